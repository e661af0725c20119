//! Placement validation: a ghost is placeable when nothing but its own
//! geometry occupies its (slightly shrunk) bounds.

use glam::Quat;

use super::geometry::compute_bounds;
use crate::world::{NodeId, SceneGraph, SceneQuery};

/// Shrink applied to the ghost box so that flush contact is not an overlap.
pub const VALIDATION_TOLERANCE: f32 = 0.98;

/// `true` when every collider overlapping the ghost's bounds (extents
/// scaled by `tolerance`) belongs to the ghost itself.
///
/// The bounds are already world-axis-aligned, so the query box is too.
/// A ghost without geometry (zero-size bounds) is always valid, and a ghost
/// that is not in the scene never is.
pub fn is_valid_placement<S>(scene: &S, ghost: NodeId, tolerance: f32) -> bool
where
    S: SceneGraph + SceneQuery + ?Sized,
{
    if !scene.contains(ghost) {
        return false;
    }

    let bounds = compute_bounds(scene, ghost);
    if bounds.extents == glam::Vec3::ZERO {
        return true;
    }

    scene
        .overlap_box(bounds.center, bounds.extents * tolerance, Quat::IDENTITY)
        .into_iter()
        .all(|hit| scene.is_descendant_of(hit, ghost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{NodeTemplate, Scene, Shape, SpawnMode, Transform};
    use glam::Vec3;

    fn unit_cube(name: &str) -> NodeTemplate {
        NodeTemplate::new(name).with_child(
            NodeTemplate::new("mesh").with_shape(Shape::solid(Vec3::ZERO, Vec3::splat(0.5))),
        )
    }

    fn place(scene: &mut Scene, name: &str, at: Vec3, mode: SpawnMode) -> NodeId {
        let node = scene.instantiate(&unit_cube(name), mode);
        scene.set_local_transform(node, Transform::from_translation(at));
        node
    }

    #[test]
    fn test_empty_space_is_valid() {
        let mut scene = Scene::new();
        let ghost = place(&mut scene, "ghost", Vec3::ZERO, SpawnMode::Preview);
        assert!(is_valid_placement(&scene, ghost, VALIDATION_TOLERANCE));
    }

    #[test]
    fn test_overlap_is_invalid() {
        let mut scene = Scene::new();
        place(&mut scene, "placed", Vec3::ZERO, SpawnMode::Permanent);
        let ghost = place(&mut scene, "ghost", Vec3::new(0.5, 0.0, 0.0), SpawnMode::Preview);
        assert!(!is_valid_placement(&scene, ghost, VALIDATION_TOLERANCE));
    }

    #[test]
    fn test_flush_contact_is_valid() {
        let mut scene = Scene::new();
        place(&mut scene, "placed", Vec3::ZERO, SpawnMode::Permanent);
        let ghost = place(&mut scene, "ghost", Vec3::new(1.0, 0.0, 0.0), SpawnMode::Preview);
        assert!(is_valid_placement(&scene, ghost, VALIDATION_TOLERANCE));
        // Without the shrink the touching faces count as an overlap
        assert!(!is_valid_placement(&scene, ghost, 1.0));
    }

    #[test]
    fn test_own_colliders_are_ignored() {
        let mut scene = Scene::new();
        // A permanent instance standing in for a ghost that kept its colliders
        let ghost = place(&mut scene, "ghost", Vec3::ZERO, SpawnMode::Permanent);
        assert!(is_valid_placement(&scene, ghost, VALIDATION_TOLERANCE));
    }

    #[test]
    fn test_missing_ghost_is_invalid() {
        let scene = Scene::new();
        assert!(!is_valid_placement(&scene, NodeId(3), VALIDATION_TOLERANCE));
    }

    #[test]
    fn test_geometry_free_ghost_is_valid() {
        let mut scene = Scene::new();
        place(&mut scene, "placed", Vec3::ZERO, SpawnMode::Permanent);
        let ghost = scene.create_empty("marker", None);
        assert!(is_valid_placement(&scene, ghost, VALIDATION_TOLERANCE));
    }
}
