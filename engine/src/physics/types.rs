//! Math type re-exports from glam
//!
//! Core mathematical types used throughout the scene and builder code.

pub use glam::{Affine3A, Quat, Vec3};
