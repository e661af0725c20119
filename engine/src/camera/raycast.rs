//! Raycast Module
//!
//! Pointer rays and their intersection with the horizontal construction
//! plane. The placement session projects the pointer onto the plane at the
//! current floor elevation every tick.

use glam::Vec3;

/// Rays nearly parallel to the plane are treated as misses.
const PARALLEL_EPSILON: f32 = 0.0001;

/// A half-line from `origin` along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized (zero stays zero).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `origin` through `target`.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Intersect a ray with the horizontal plane `y = plane_height`.
///
/// # Returns
/// * `Some(Vec3)` - The intersection point on the plane
/// * `None` - Ray parallel to the plane or pointing away from it
pub fn ray_plane_intersection(ray: &Ray, plane_height: f32) -> Option<Vec3> {
    // Solve: origin.y + t * dir.y = plane_height
    if ray.direction.y.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (plane_height - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        // Intersection is behind the ray origin
        return None;
    }

    Some(ray.point_at(t))
}

/// Calculate a world ray from screen UV coordinates.
///
/// # Arguments
/// * `camera_pos` - Camera position in world space
/// * `camera_target` - Point the camera is looking at
/// * `uv` - Normalized screen coordinates (0-1, 0-1) where (0,0) is bottom-left
/// * `config` - Aspect ratio and field of view
pub fn screen_ray(camera_pos: Vec3, camera_target: Vec3, uv: (f32, f32), config: &RaycastConfig) -> Ray {
    let ndc = (uv.0 * 2.0 - 1.0, uv.1 * 2.0 - 1.0);
    let half_fov = (config.fov * 0.5_f32).tan();

    let forward = (camera_target - camera_pos).normalize_or_zero();
    let up_world = Vec3::Y;

    // Looking straight up or down: use world X as the right vector
    let (right, up) = if forward.y.abs() > 0.99 {
        let right = Vec3::X;
        let up = right.cross(forward).normalize();
        (right, up)
    } else {
        let right = forward.cross(up_world).normalize();
        let up = right.cross(forward);
        (right, up)
    };

    let direction = forward + right * ndc.0 * config.aspect_ratio * half_fov + up * ndc.1 * half_fov;
    Ray::new(camera_pos, direction)
}

/// Raycast configuration for convenience
#[derive(Clone, Copy, Debug)]
pub struct RaycastConfig {
    /// Screen aspect ratio (width / height)
    pub aspect_ratio: f32,
    /// Field of view in radians
    pub fov: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            fov: std::f32::consts::FRAC_PI_3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_down_hits_plane() {
        let ray = Ray::new(Vec3::new(2.0, 10.0, -3.0), Vec3::NEG_Y);
        let hit = ray_plane_intersection(&ray, 3.0).unwrap();
        assert!((hit - Vec3::new(2.0, 3.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(ray_plane_intersection(&ray, 0.0).is_none());
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ray_plane_intersection(&ray, 0.0).is_none());
    }

    #[test]
    fn test_center_screen_ray_points_at_target() {
        let cam = Vec3::new(0.0, 10.0, 10.0);
        let ray = screen_ray(cam, Vec3::ZERO, (0.5, 0.5), &RaycastConfig::default());
        let expected = (Vec3::ZERO - cam).normalize();
        assert!((ray.direction - expected).length() < 1e-5);
        let hit = ray_plane_intersection(&ray, 0.0).unwrap();
        assert!(hit.length() < 1e-4);
    }

    #[test]
    fn test_screen_right_maps_to_world_right() {
        // Camera looking down -Z: moving right on screen moves +X in world
        let cam = Vec3::new(0.0, 5.0, 10.0);
        let ray = screen_ray(cam, Vec3::new(0.0, 0.0, 0.0), (0.9, 0.5), &RaycastConfig::default());
        let hit = ray_plane_intersection(&ray, 0.0).unwrap();
        assert!(hit.x > 0.0);
    }
}
