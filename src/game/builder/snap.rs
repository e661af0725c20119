//! Snap Resolution
//!
//! Given the ghost and its chosen neighbor, work out where the ghost goes.
//! Three modes:
//!
//! - **Vertical**: copy the neighbor's X/Z, keep the ghost's height.
//! - **Corner**: butt against the neighbor along the dominant axis (ties go
//!   to X) and turn to face away from it.
//! - **Standard**: butt against the neighbor along the dominant axis (ties
//!   go to Z), rotation untouched.
//!
//! In every mode the ghost keeps its own Y.

use glam::{Quat, Vec3};

use super::module::ModuleType;
use super::neighbor::Neighbor;

/// Position and half-size of one side of a snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapBody {
    pub position: Vec3,
    pub extents: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapMode {
    Vertical,
    Corner,
    Standard,
}

impl SnapMode {
    pub fn select(module_type: ModuleType, vertical: bool) -> Self {
        if vertical {
            SnapMode::Vertical
        } else if module_type == ModuleType::Corner {
            SnapMode::Corner
        } else {
            SnapMode::Standard
        }
    }
}

/// Where the ghost ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolution {
    pub mode: SnapMode,
    /// New ghost world position
    pub position: Vec3,
    /// Offset from the neighbor position (zero in vertical mode)
    pub offset: Vec3,
    /// Absolute yaw to apply, only set by corner snapping
    pub yaw_degrees: Option<f32>,
}

impl SnapResolution {
    pub fn rotation(&self) -> Option<Quat> {
        self.yaw_degrees.map(|deg| Quat::from_rotation_y(deg.to_radians()))
    }
}

/// Sign with zero counted as positive.
fn sign(v: f32) -> f32 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}

/// Snap is applied when there is a neighbor and either vertical mode is on
/// or the neighbor sits within `threshold`.
pub fn should_snap(neighbor: Option<&Neighbor>, vertical: bool, threshold: f32) -> bool {
    neighbor.is_some_and(|n| vertical || n.distance <= threshold)
}

/// Resolve the ghost position against `neighbor`.
pub fn resolve_snap(ghost: &SnapBody, neighbor: &SnapBody, module_type: ModuleType, vertical: bool) -> SnapResolution {
    let mode = SnapMode::select(module_type, vertical);
    let dir = ghost.position - neighbor.position;
    let reach = neighbor.extents + ghost.extents;

    let (offset, yaw_degrees) = match mode {
        SnapMode::Vertical => (Vec3::ZERO, None),
        SnapMode::Corner => {
            if dir.x.abs() >= dir.z.abs() {
                let yaw = if dir.x >= 0.0 { 90.0 } else { -90.0 };
                (Vec3::new(sign(dir.x) * reach.x, 0.0, 0.0), Some(yaw))
            } else {
                let yaw = if dir.z >= 0.0 { 0.0 } else { 180.0 };
                (Vec3::new(0.0, 0.0, sign(dir.z) * reach.z), Some(yaw))
            }
        }
        SnapMode::Standard => {
            if dir.x.abs() > dir.z.abs() {
                (Vec3::new(sign(dir.x) * reach.x, 0.0, 0.0), None)
            } else {
                (Vec3::new(0.0, 0.0, sign(dir.z) * reach.z), None)
            }
        }
    };

    let target = neighbor.position + offset;
    SnapResolution {
        mode,
        position: Vec3::new(target.x, ghost.position.y, target.z),
        offset,
        yaw_degrees,
    }
}
