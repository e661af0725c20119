//! Config Module
//!
//! Centralized tuning for the building tool.

pub mod builder_config;

pub use builder_config::BuilderConfig;
