use glam::{Mat2, UVec2, Vec2, Vec3, uvec2, vec2, vec3};

/// View-point and projection parameters for one render pass.
///
/// * `pos.z` is the eye height *within* the cell column, `0.0` floor to
///   `1.0` ceiling.
/// * `front` and `right` are deliberately not required to be unit length:
///   their ratio is the horizontal field of view. Every screen column gets
///   the ray `front + right * offset` with `offset ∈ [-1, 1)`.
/// * `facing` shifts everything vertically on screen (look up/down).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec3,
    pub front: Vec2,
    pub right: Vec2,
    pub facing: f32,
    pub res: UVec2,
    /// Total tile-step budget for a ray, shared across the whole
    /// reflection/transparency chain.
    pub render_distance: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: vec3(0.0, 0.0, 0.5),
            front: vec2(0.0, -1.0),
            right: vec2(1.0, 0.0),
            facing: 0.0,
            res: uvec2(640, 400),
            render_distance: 64,
        }
    }
}

impl Camera {
    /// Rotate the view basis around the Z-axis. Both `front` and `right`
    /// turn together so the field of view is preserved.
    pub fn rotate(&mut self, ang: f32) {
        let rotation = Mat2::from_angle(ang);
        self.front = rotation * self.front;
        self.right = rotation * self.right;
    }

    /// Left edge of screen column `col` in normalized device coordinates.
    #[inline]
    pub fn column_offset(&self, col: u32) -> f32 {
        -1.0 + col as f32 * self.column_width()
    }

    /// Width of one screen column in NDC: `2 / res.x`.
    #[inline]
    pub fn column_width(&self) -> f32 {
        2.0 / self.res.x as f32
    }

    /// World-space ray direction through the column at `offset`.
    #[inline]
    pub fn ray_dir(&self, offset: f32) -> Vec2 {
        self.front + self.right * offset
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_pose_looks_down_negative_y() {
        let cam = Camera::default();
        assert_eq!(cam.front, vec2(0.0, -1.0));
        assert_eq!(cam.right, vec2(1.0, 0.0));
        assert_eq!(cam.ray_dir(0.0), vec2(0.0, -1.0));
    }

    #[test]
    fn rotate_quarter_turn_maps_front_onto_old_right() {
        let mut cam = Camera::default();
        cam.rotate(FRAC_PI_2);
        // CCW quarter turn: (0,-1) → (1,0), (1,0) → (0,1)
        assert!((cam.front - vec2(1.0, 0.0)).length() < 1e-6);
        assert!((cam.right - vec2(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn rotate_preserves_basis_lengths() {
        let mut cam = Camera::default();
        cam.right *= 0.66; // narrow FOV
        cam.rotate(1.234);
        assert!((cam.front.length() - 1.0).abs() < 1e-6);
        assert!((cam.right.length() - 0.66).abs() < 1e-6);
    }

    #[test]
    fn columns_span_the_ndc_range() {
        let cam = Camera {
            res: uvec2(4, 4),
            ..Camera::default()
        };
        assert_eq!(cam.column_offset(0), -1.0);
        assert_eq!(cam.column_offset(2), 0.0);
        assert!((cam.column_offset(3) + cam.column_width() - 1.0).abs() < 1e-6);
    }
}
