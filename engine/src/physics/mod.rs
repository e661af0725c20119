//! Physics module
//!
//! Geometry primitives for the placement engine. No physics library is
//! pulled in: the builder only needs box volumes and overlap tests, and the
//! broad phase is a linear scan inside [`crate::world::Scene`].
//!
//! # Unit System
//!
//! **1 unit = 1 meter**. One logical building floor is 3 units tall.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Quat) re-exported from glam
//! - [`bounds`] - Axis-aligned center/extents volumes
//! - [`collision`] - Oriented box overlap (separating axis test)

pub mod bounds;
pub mod collision;
pub mod types;

pub use bounds::BoundingVolume;
pub use collision::OrientedBox;
pub use types::{Affine3A, Quat, Vec3};
