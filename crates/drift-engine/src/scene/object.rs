use glam::{Mat4, Quat, Vec2, Vec3};

use super::MeshHandle;

/// One drawable entity: a mesh handle plus a 2D world transform.
///
/// The model matrix composes translate · rotate · scale, so scale and
/// rotation apply in object-local space before translation to world space.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    mesh: MeshHandle,
    position: Vec2,
    scale: Vec2,
    rotation_deg: f32,
}

impl SceneObject {
    /// Creates an object at `position` with identity scale and rotation.
    pub fn new(mesh: MeshHandle, position: Vec2) -> Self {
        Self {
            mesh,
            position,
            scale: Vec2::ONE,
            rotation_deg: 0.0,
        }
    }

    #[inline]
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    #[inline]
    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    /// Setters are unvalidated; callers own correctness (e.g. no NaN).
    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    #[inline]
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation_deg = degrees;
    }

    /// Builder-style scale, handy during scene setup.
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style rotation, handy during scene setup.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_deg = degrees;
        self
    }

    /// Composes the model matrix: translate(position) · rotate_z(rotation) ·
    /// scale(scale).
    ///
    /// Rotation at exactly 0° and scale at exactly (1,1) skip their factor;
    /// the fast path is numerically identical to the general one.
    pub fn model_matrix(&self) -> Mat4 {
        let mut model = Mat4::from_translation(Vec3::new(self.position.x, self.position.y, 0.0));

        if self.rotation_deg != 0.0 {
            model *= Mat4::from_rotation_z(self.rotation_deg.to_radians());
        }
        if self.scale != Vec2::ONE {
            model *= Mat4::from_scale(Vec3::new(self.scale.x, self.scale.y, 1.0));
        }

        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(position: Vec2) -> SceneObject {
        SceneObject::new(MeshHandle(0), position)
    }

    // ── identity path ─────────────────────────────────────────────────────

    #[test]
    fn identity_transform_is_pure_translation() {
        let o = obj(Vec2::new(3.0, -2.0));
        let expected = Mat4::from_translation(Vec3::new(3.0, -2.0, 0.0));
        assert_eq!(o.model_matrix(), expected);
    }

    #[test]
    fn fast_path_matches_general_path() {
        // Force the general path with an epsilon-free identity.
        let fast = obj(Vec2::new(5.0, 7.0)).model_matrix();

        let general = Mat4::from_translation(Vec3::new(5.0, 7.0, 0.0))
            * Mat4::from_rotation_z(0.0)
            * Mat4::from_scale(Vec3::new(1.0, 1.0, 1.0));

        let (a, b) = (fast.to_cols_array(), general.to_cols_array());
        for i in 0..16 {
            assert!((a[i] - b[i]).abs() < 1e-6, "element {i}: {} vs {}", a[i], b[i]);
        }
    }

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn rotation_happens_before_translation() {
        // Local +X under 90° rotation becomes world +Y, then translates.
        let o = obj(Vec2::new(10.0, 0.0)).with_rotation(90.0);
        let p = o.model_matrix() * glam::Vec4::new(1.0, 0.0, 0.0, 1.0);

        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn scale_applies_in_local_space() {
        let o = obj(Vec2::new(0.0, 0.0))
            .with_rotation(90.0)
            .with_scale(Vec2::new(2.0, 1.0));
        // Local (1, 0) scales to (2, 0), rotates to (0, 2).
        let p = o.model_matrix() * glam::Vec4::new(1.0, 0.0, 0.0, 1.0);

        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn zero_scale_actually_collapses_geometry() {
        // (0,0) is a real scale, not a "no scale" sentinel.
        let o = obj(Vec2::new(4.0, 4.0)).with_scale(Vec2::ZERO);
        let p = o.model_matrix() * glam::Vec4::new(1.0, 1.0, 0.0, 1.0);

        assert!((p.x - 4.0).abs() < 1e-6);
        assert!((p.y - 4.0).abs() < 1e-6);
    }
}
