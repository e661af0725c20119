//! Bounding Volumes
//!
//! Axis-aligned boxes stored as center + half-size, the shape every placement
//! query in the builder works with.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box described by its center and half-size per axis.
///
/// A volume with zero extents is a valid "point" box; objects without any
/// renderable geometry collapse to one at their origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingVolume {
    /// World-space center of the box
    pub center: Vec3,
    /// Half-size along each axis (never negative)
    pub extents: Vec3,
}

impl BoundingVolume {
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    /// Zero-size box at `point`.
    pub fn point(point: Vec3) -> Self {
        Self::new(point, Vec3::ZERO)
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self::new((lo + hi) * 0.5, (hi - lo) * 0.5)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Full size (twice the extents).
    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    /// Grow this box so it also encloses `other`.
    pub fn encapsulate(&self, other: &BoundingVolume) -> Self {
        Self::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Axis-aligned box enclosing this box after an affine transform.
    ///
    /// Uses the absolute-matrix trick instead of transforming all 8 corners.
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let center = transform.transform_point3(self.center);
        let m = transform.matrix3;
        let extents = Vec3::new(
            m.x_axis.x.abs() * self.extents.x
                + m.y_axis.x.abs() * self.extents.y
                + m.z_axis.x.abs() * self.extents.z,
            m.x_axis.y.abs() * self.extents.x
                + m.y_axis.y.abs() * self.extents.y
                + m.z_axis.y.abs() * self.extents.z,
            m.x_axis.z.abs() * self.extents.x
                + m.y_axis.z.abs() * self.extents.y
                + m.z_axis.z.abs() * self.extents.z,
        );
        Self::new(center, extents)
    }

    /// Inclusive overlap test (touching boxes intersect).
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.extents + other.extents;
        d.x <= reach.x && d.y <= reach.y && d.z <= reach.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_min_max_roundtrip() {
        let b = BoundingVolume::from_min_max(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 6.0));
        assert_eq!(b.center, Vec3::new(1.0, 2.0, 4.0));
        assert_eq!(b.extents, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(b.min(), Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(b.max(), Vec3::new(3.0, 4.0, 6.0));
    }

    #[test]
    fn test_encapsulate() {
        let a = BoundingVolume::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingVolume::new(Vec3::new(4.0, 0.0, 0.0), Vec3::ONE);
        let u = a.encapsulate(&b);
        assert_eq!(u.min(), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(u.max(), Vec3::new(5.0, 1.0, 1.0));
    }

    #[test]
    fn test_transformed_quarter_turn_swaps_extents() {
        let b = BoundingVolume::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 0.5));
        let t = Affine3A::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(10.0, 0.0, 0.0),
        );
        let r = b.transformed(&t);
        assert!((r.center - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
        assert!((r.extents - Vec3::new(0.5, 1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_touching_boxes_intersect() {
        let a = BoundingVolume::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingVolume::new(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        let c = BoundingVolume::new(Vec3::new(2.1, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_negative_extents_are_normalized() {
        let b = BoundingVolume::new(Vec3::ZERO, Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.extents, Vec3::new(1.0, 2.0, 3.0));
    }
}
