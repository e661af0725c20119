//! Collision detection module
//!
//! Oriented box overlap for scene queries. Colliders are boxes attached to
//! scene nodes; once a node's world matrix carries rotation and non-uniform
//! scale the box is no longer axis-aligned, so overlap is decided with the
//! separating axis theorem over the 15 candidate axes (3 + 3 face normals,
//! 9 edge cross products).
//!
//! # Example
//!
//! ```ignore
//! use modular_builder_engine::physics::{BoundingVolume, OrientedBox};
//! use glam::{Quat, Vec3};
//!
//! let a = OrientedBox::axis_aligned(&BoundingVolume::new(Vec3::ZERO, Vec3::ONE));
//! let b = OrientedBox::from_volume(
//!     &BoundingVolume::new(Vec3::new(2.2, 0.0, 0.0), Vec3::ONE),
//!     Quat::from_rotation_y(0.785),
//! );
//! assert!(a.intersects(&b));
//! ```

use glam::{Affine3A, Quat, Vec3};

use super::bounds::BoundingVolume;

/// Slack added to the rotation terms so near-parallel edges don't produce
/// a degenerate cross-product axis.
const SAT_EPSILON: f32 = 1e-6;

/// Box with an arbitrary orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// World-space center
    pub center: Vec3,
    /// Unit axes of the box frame (local X, Y, Z in world space)
    pub axes: [Vec3; 3],
    /// Half-size along each local axis
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Box aligned with the world axes.
    pub fn axis_aligned(volume: &BoundingVolume) -> Self {
        Self {
            center: volume.center,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
            half_extents: volume.extents,
        }
    }

    /// Box with `volume`'s center and extents, rotated by `rotation`.
    pub fn from_volume(volume: &BoundingVolume, rotation: Quat) -> Self {
        Self {
            center: volume.center,
            axes: [rotation * Vec3::X, rotation * Vec3::Y, rotation * Vec3::Z],
            half_extents: volume.extents,
        }
    }

    /// Local box (`local_center`, `local_half`) carried into world space by `world`.
    ///
    /// Scale is folded into the half extents; shear from non-uniform parent
    /// scale is ignored.
    pub fn from_local(local_center: Vec3, local_half: Vec3, world: &Affine3A) -> Self {
        let m = world.matrix3;
        let cols = [Vec3::from(m.x_axis), Vec3::from(m.y_axis), Vec3::from(m.z_axis)];
        Self {
            center: world.transform_point3(local_center),
            axes: [
                cols[0].normalize_or_zero(),
                cols[1].normalize_or_zero(),
                cols[2].normalize_or_zero(),
            ],
            half_extents: (local_half
                * Vec3::new(cols[0].length(), cols[1].length(), cols[2].length()))
            .abs(),
        }
    }

    /// Axis-aligned box enclosing this oriented box.
    pub fn enclosing_volume(&self) -> BoundingVolume {
        let e = self.half_extents;
        let extents = self.axes[0].abs() * e.x + self.axes[1].abs() * e.y + self.axes[2].abs() * e.z;
        BoundingVolume::new(self.center, extents)
    }

    /// Separating axis test. Touching boxes count as intersecting.
    pub fn intersects(&self, other: &OrientedBox) -> bool {
        let a = self;
        let b = other;
        let ae = a.half_extents.to_array();
        let be = b.half_extents.to_array();

        let mut r = [[0.0_f32; 3]; 3];
        let mut abs_r = [[0.0_f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                r[i][j] = a.axes[i].dot(b.axes[j]);
                abs_r[i][j] = r[i][j].abs() + SAT_EPSILON;
            }
        }

        let d = b.center - a.center;
        let t = [d.dot(a.axes[0]), d.dot(a.axes[1]), d.dot(a.axes[2])];

        // Face normals of A
        for i in 0..3 {
            let ra = ae[i];
            let rb = be[0] * abs_r[i][0] + be[1] * abs_r[i][1] + be[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        // Face normals of B
        for j in 0..3 {
            let ra = ae[0] * abs_r[0][j] + ae[1] * abs_r[1][j] + ae[2] * abs_r[2][j];
            let rb = be[j];
            let dist = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
            if dist.abs() > ra + rb {
                return false;
            }
        }

        // Edge-edge cross products A_i x B_j
        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;
            for j in 0..3 {
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;
                let ra = ae[i1] * abs_r[i2][j] + ae[i2] * abs_r[i1][j];
                let rb = be[j1] * abs_r[i][j2] + be[j2] * abs_r[i][j1];
                let dist = t[i2] * r[i1][j] - t[i1] * r[i2][j];
                if dist.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}
