//! Game Module
//!
//! The building tool that sits on top of the engine: configuration and the
//! modular placement workflow.

pub mod builder;
pub mod config;

pub use builder::{BuildCommand, BuildError, FrameInput, ModuleCatalog, ModuleType, PlacementSession, TickReport};
pub use config::BuilderConfig;
