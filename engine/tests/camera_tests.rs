//! Camera Tests - Pointer rays and floor-plane projection
//!
//! Tests for the camera module: building world rays from screen
//! coordinates and projecting them onto the construction plane.

use glam::Vec3;
use modular_builder_engine::camera::{Ray, RaycastConfig, ray_plane_intersection, screen_ray};

// ============================================================================
// Screen Ray Tests
// ============================================================================

#[test]
fn test_screen_ray_center_hits_target() {
    let camera_pos = Vec3::new(0.0, 10.0, 10.0);
    let camera_target = Vec3::ZERO;

    let ray = screen_ray(camera_pos, camera_target, (0.5, 0.5), &RaycastConfig::default());
    let hit = ray_plane_intersection(&ray, 0.0).unwrap();
    assert!(hit.length() < 0.01);
}

#[test]
fn test_screen_ray_straight_down() {
    let camera_pos = Vec3::new(3.0, 5.0, -2.0);
    let camera_target = Vec3::new(3.0, 0.0, -2.0);

    let ray = screen_ray(camera_pos, camera_target, (0.5, 0.5), &RaycastConfig::default());
    let hit = ray_plane_intersection(&ray, 0.0).unwrap();
    assert!((hit - Vec3::new(3.0, 0.0, -2.0)).length() < 0.01);
}

#[test]
fn test_screen_ray_direction_normalized() {
    let ray = screen_ray(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, (0.2, 0.9), &RaycastConfig::default());
    assert!((ray.direction.length() - 1.0).abs() < 0.001);
}

#[test]
fn test_screen_ray_right_half_goes_right() {
    // Looking down -Z, so screen right is world +X
    let camera_pos = Vec3::new(0.0, 10.0, 10.0);
    let ray = screen_ray(camera_pos, Vec3::ZERO, (0.9, 0.5), &RaycastConfig::default());
    let hit = ray_plane_intersection(&ray, 0.0).unwrap();
    assert!(hit.x > 0.5);
}

#[test]
fn test_raycast_config_default() {
    let config = RaycastConfig::default();
    assert!((config.aspect_ratio - 16.0 / 9.0).abs() < 0.01);
    assert!(config.fov > 0.0);
}

// ============================================================================
// Plane Projection Tests
// ============================================================================

#[test]
fn test_projection_onto_raised_floor() {
    let ray = Ray::towards(Vec3::new(0.0, 10.0, 5.0), Vec3::new(0.0, 0.0, 0.0));
    let hit = ray_plane_intersection(&ray, 6.0).unwrap();
    assert!((hit.y - 6.0).abs() < 1e-4);
    assert!((hit.z - 3.0).abs() < 1e-4);
}

#[test]
fn test_parallel_ray_misses() {
    let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 1.0));
    assert!(ray_plane_intersection(&ray, 0.0).is_none());
}

#[test]
fn test_plane_behind_ray_misses() {
    // Looking up, floor below
    let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.3));
    assert!(ray_plane_intersection(&ray, 0.0).is_none());
}

#[test]
fn test_ray_starting_on_plane() {
    let ray = Ray::new(Vec3::new(1.0, 3.0, 1.0), Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(ray_plane_intersection(&ray, 3.0), Some(Vec3::new(1.0, 3.0, 1.0)));
}
