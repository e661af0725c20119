//! Camera Module
//!
//! Pointer ray construction and plane raycasting. Window-system agnostic:
//! it only deals with camera math, the host supplies positions and UVs.

pub mod raycast;

pub use raycast::{Ray, RaycastConfig, ray_plane_intersection, screen_ray};
