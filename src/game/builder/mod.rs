//! Builder Module
//!
//! Modular building placement: a ghost preview of the selected module
//! follows the pointer on the current floor, snaps against neighbouring
//! modules, is validated against overlaps and is committed into a named
//! building on request.
//!
//! - [`module`] - Module types, prototypes and the catalog
//! - [`geometry`] - Bounds helpers
//! - [`validator`] - Overlap validation
//! - [`neighbor`] - Snap partner search and module classification
//! - [`snap`] - Snap resolution
//! - [`floor`] - Floor elevation, snap mode and debounce
//! - [`commands`] - Build commands and input decoding
//! - [`hierarchy`] - Building root and category groups
//! - [`session`] - Per-frame orchestration

pub mod commands;
pub mod error;
pub mod floor;
pub mod geometry;
pub mod ghost;
pub mod hierarchy;
pub mod module;
pub mod neighbor;
pub mod prefs;
pub mod session;
pub mod snap;
pub mod undo;
pub mod validator;

pub use commands::{BuildCommand, CommandDecoder};
pub use error::BuildError;
pub use floor::{CommandCooldown, FloorState};
pub use geometry::{bottom_center, compute_bounds, top_center, uniform};
pub use ghost::{GHOST_ALPHA, Ghost, GhostMaterial};
pub use hierarchy::ConstructionSite;
pub use module::{ModuleCatalog, ModulePrototype, ModuleType};
pub use neighbor::{ModuleIndex, Neighbor, SearchParams, VERTICAL_SNAP_LAST_WINS, find_closest_neighbor, infer_module_type};
pub use prefs::{JsonPrefs, MemoryPrefs, ToolState, ToolStateStore};
pub use session::{FrameInput, PlacementSession, TickReport};
pub use snap::{SnapBody, SnapMode, SnapResolution, resolve_snap, should_snap};
pub use undo::{UndoCommand, UndoLedger, UndoStack};
pub use validator::{VALIDATION_TOLERANCE, is_valid_placement};
