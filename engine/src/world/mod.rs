//! World Module
//!
//! The scene the builder places modules into: node handles, transforms,
//! collaborator traits, and an in-memory scene graph implementing them.

pub mod graph;
pub mod scene;

pub use graph::{NodeId, NodeTemplate, SceneGraph, SceneQuery, Shape, SpawnMode, Transform};
pub use scene::{Node, Scene};
