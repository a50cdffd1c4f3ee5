use glam::{Vec2, Vec3};

use crate::constants::{CAMERA_DISTANCE, CAMERA_FOV_DEG};
use crate::host::Viewport;

/// Perspective camera looking down -Z that sways on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Focal length in pixels.
    pub focal: f32,
    pub center: Vec2,
}

/// A world point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Distance in front of the camera along the view axis.
    pub depth: f32,
}

impl Camera {
    pub fn at(t: f32, viewport: Viewport) -> Self {
        let position = Vec3::new((t * 0.05).sin() * 0.3, (t * 0.04).cos() * 0.2, CAMERA_DISTANCE);
        let half_fov = (CAMERA_FOV_DEG * 0.5).to_radians();
        Self {
            position,
            focal: (viewport.height * 0.5) / half_fov.tan(),
            center: Vec2::new(viewport.width * 0.5, viewport.height * 0.5),
        }
    }

    /// `None` for points at or behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        let view = world - self.position;
        let depth = -view.z;
        if depth <= 0.1 {
            return None;
        }
        let scale = self.focal / depth;
        Some(Projected {
            screen: Vec2::new(self.center.x + view.x * scale, self.center.y - view.y * scale),
            depth,
        })
    }

    /// Screen size in pixels of a world length at `depth`.
    pub fn pixels(&self, length: f32, depth: f32) -> f32 {
        length * self.focal / depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport { width: 1600.0, height: 900.0 };

    #[test]
    fn test_sway_is_small_and_bounded() {
        for i in 0..1_000 {
            let cam = Camera::at(i as f32 * 0.7, VIEW);
            assert!(cam.position.x.abs() <= 0.3 + 1e-6);
            assert!(cam.position.y.abs() <= 0.2 + 1e-6);
            assert_eq!(cam.position.z, 12.0);
        }
    }

    #[test]
    fn test_origin_projects_near_center() {
        let cam = Camera::at(0.0, VIEW);
        let p = cam.project(Vec3::ZERO).unwrap();
        assert_eq!(p.depth, 12.0);
        // At t = 0 the camera sits 0.2 up, so the origin lands slightly below centre.
        assert!((p.screen.x - 800.0).abs() < 1e-3);
        assert!(p.screen.y > 450.0);
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let cam = Camera::at(0.0, VIEW);
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn test_fov_edge_maps_to_screen_edge() {
        let cam = Camera { position: Vec3::new(0.0, 0.0, 12.0), ..Camera::at(0.0, VIEW) };
        let half = (27.5_f32).to_radians().tan() * 12.0;
        let p = cam.project(Vec3::new(0.0, half, 0.0)).unwrap();
        assert!(p.screen.y.abs() < 1e-2);
    }
}
