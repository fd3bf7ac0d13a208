//! 2D pan/zoom camera.

use glam::{Mat4, Vec2, Vec3};

/// Orthographic 2D camera: world position, zoom factor, viewport size.
///
/// Zoom convention: larger zoom narrows the visible extent (magnification).
/// Zoom must stay strictly positive; `set_zoom` does not validate, callers
/// clamp before calling (a zero zoom produces a singular projection).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec2,
    zoom: f32,
    width: f32,
    height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    #[inline]
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Camera space is world space shifted so the camera position is the
    /// origin. No rotation support.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, 0.0))
    }

    /// Orthographic projection with half-extents `(width/2)/zoom` and
    /// `(height/2)/zoom`, near −1, far 1 (glam maps the range onto wgpu's
    /// [0, 1] depth; the Z=0 render plane lands mid-volume).
    pub fn projection_matrix(&self) -> Mat4 {
        let hw = (self.width * 0.5) / self.zoom;
        let hh = (self.height * 0.5) / self.zoom;
        Mat4::orthographic_rh(-hw, hw, -hh, hh, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec4;

    use super::*;

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn half_extent_points_map_to_clip_edges() {
        let cam = Camera::new(800.0, 600.0);

        // World (400, 300) is the top-right corner of the visible extent.
        let p = cam.projection_matrix() * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn doubling_zoom_halves_visible_extent() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.set_zoom(2.0);

        // Half the old extent now reaches the clip edge.
        let p = cam.projection_matrix() * Vec4::new(200.0, 150.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);

        // The old corner is now outside the clip volume.
        let q = cam.projection_matrix() * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert_relative_eq!(q.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn resize_changes_aspect() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.set_size(1600.0, 600.0);

        let p = cam.projection_matrix() * Vec4::new(800.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
    }

    // ── view ──────────────────────────────────────────────────────────────

    #[test]
    fn view_translates_by_negated_position() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.set_position(Vec2::new(100.0, -40.0));

        let p = cam.view_matrix() * Vec4::new(100.0, -40.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn centered_camera_keeps_world_fixed_point() {
        let cam = Camera::new(800.0, 600.0);
        let p = cam.view_matrix() * Vec4::new(12.5, 8.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 12.5, epsilon = 1e-6);
        assert_relative_eq!(p.y, 8.0, epsilon = 1e-6);
    }
}
