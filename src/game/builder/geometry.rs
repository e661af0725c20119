//! Placement Geometry
//!
//! Bounds helpers shared by validation, neighbor search and snapping.

use glam::Vec3;

use crate::physics::BoundingVolume;
use crate::world::{NodeId, SceneGraph};

/// World-space box enclosing every renderable in `node`'s subtree.
///
/// Nodes without renderables collapse to a zero-size box at their world
/// position (or at the origin if the node is gone).
pub fn compute_bounds<S: SceneGraph + ?Sized>(scene: &S, node: NodeId) -> BoundingVolume {
    let mut parts = scene.renderable_bounds(node).into_iter();
    match parts.next() {
        Some(first) => parts.fold(first, |acc, b| acc.encapsulate(&b)),
        None => BoundingVolume::point(scene.world_position(node).unwrap_or(Vec3::ZERO)),
    }
}

/// Square the footprint of `volume`: when width and depth differ by more
/// than `epsilon`, both become the larger of the two. Height and center are
/// untouched. Applying it twice changes nothing.
pub fn uniform(volume: &BoundingVolume, epsilon: f32) -> BoundingVolume {
    let ext = volume.extents;
    if (ext.x - ext.z).abs() > epsilon {
        let side = ext.x.max(ext.z);
        BoundingVolume::new(volume.center, Vec3::new(side, ext.y, side))
    } else {
        *volume
    }
}

/// Center of the bottom face.
pub fn bottom_center(volume: &BoundingVolume) -> Vec3 {
    Vec3::new(volume.center.x, volume.min().y, volume.center.z)
}

/// Center of the top face.
pub fn top_center(volume: &BoundingVolume) -> Vec3 {
    Vec3::new(volume.center.x, volume.max().y, volume.center.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{NodeTemplate, Scene, Shape, SpawnMode, Transform};

    #[test]
    fn test_uniform_squares_footprint() {
        let v = BoundingVolume::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.5, 1.0, 0.1));
        let u = uniform(&v, 1e-3);
        assert_eq!(u.extents, Vec3::new(1.5, 1.0, 1.5));
        assert_eq!(u.center, v.center);
        assert_eq!(uniform(&u, 1e-3), u);
    }

    #[test]
    fn test_uniform_leaves_square_box_alone() {
        let v = BoundingVolume::new(Vec3::ZERO, Vec3::new(1.0, 5.0, 1.0005));
        assert_eq!(uniform(&v, 1e-3), v);
    }

    #[test]
    fn test_face_centers() {
        let v = BoundingVolume::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 0.25));
        assert_eq!(bottom_center(&v), Vec3::new(1.0, 1.0, 3.0));
        assert_eq!(top_center(&v), Vec3::new(1.0, 3.0, 3.0));
    }

    #[test]
    fn test_compute_bounds_unions_parts() {
        let mut scene = Scene::new();
        let template = NodeTemplate::new("Module")
            .with_transform(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)))
            .with_child(NodeTemplate::new("a").with_shape(Shape::solid(Vec3::new(-1.0, 0.0, 0.0), Vec3::ONE)))
            .with_child(NodeTemplate::new("b").with_shape(Shape::visual(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE)));
        let node = scene.instantiate(&template, SpawnMode::Permanent);

        let bounds = compute_bounds(&scene, node);
        assert!((bounds.center - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
        assert!((bounds.extents - Vec3::new(2.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_compute_bounds_without_renderables() {
        let mut scene = Scene::new();
        let empty = scene.create_empty("Empty", None);
        scene.set_local_transform(empty, Transform::from_translation(Vec3::new(4.0, 3.0, 0.0)));

        let bounds = compute_bounds(&scene, empty);
        assert_eq!(bounds, BoundingVolume::point(Vec3::new(4.0, 3.0, 0.0)));
        assert_eq!(compute_bounds(&scene, NodeId(999)), BoundingVolume::point(Vec3::ZERO));
    }
}
