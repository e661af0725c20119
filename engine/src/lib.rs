//! Modular Builder Engine Library
//!
//! Interactive placement engine for assembling buildings out of modular
//! pieces (floors, walls, roofs, corner junctions, props). A ghost preview
//! follows the pointer on the current floor plane, magnetically snaps to
//! neighbouring modules, is validated against overlaps every tick, and is
//! committed into the scene on request.
//!
//! # Modules
//!
//! - [`physics`] - Bounding volumes and oriented-box overlap
//! - [`camera`] - Pointer rays and plane raycasting
//! - [`input`] - Platform-agnostic keyboard/mouse primitives
//! - [`world`] - Scene graph contracts and an in-memory scene
//! - [`game`] - The building tool itself (placement session, snapping, catalog)
//!
//! # Example
//!
//! ```ignore
//! use modular_builder_engine::game::builder::{ModuleCatalog, PlacementSession, FrameInput};
//! use modular_builder_engine::game::config::BuilderConfig;
//! use modular_builder_engine::game::builder::prefs::MemoryPrefs;
//! use modular_builder_engine::game::builder::undo::UndoStack;
//! use modular_builder_engine::world::Scene;
//!
//! let mut scene = Scene::new();
//! let mut undo = UndoStack::new();
//! let mut session = PlacementSession::start(
//!     ModuleCatalog::builtin(),
//!     BuilderConfig::default(),
//!     Box::new(MemoryPrefs::default()),
//! );
//! session.begin_building(&mut scene, "New Building");
//! session.select("Wall_Plain");
//! let report = session.tick(&mut scene, &mut undo, &FrameInput::default());
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod world;

// Building-tool modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level for convenience
pub use camera::{Ray, ray_plane_intersection};
pub use physics::{BoundingVolume, OrientedBox};
pub use world::{NodeId, Scene, SceneGraph, SceneQuery, Transform};
