//! Builder errors.

use thiserror::Error;

use crate::world::NodeId;

/// Failures surfaced by the building tool.
#[derive(Debug, Error)]
pub enum BuildError {
    /// An operation needed a construction root but none is open.
    #[error("no building in progress")]
    NoActiveBuilding,
    /// The construction root was removed from the scene behind our back.
    #[error("building root {0} no longer exists")]
    MissingRoot(NodeId),
    /// A prototype name that the catalog does not know.
    #[error("unknown module prototype: {0}")]
    UnknownPrototype(String),
    /// Wrap IO errors when reading or writing catalog, config and prefs files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
}
