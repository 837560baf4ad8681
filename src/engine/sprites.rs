//! Billboard sprite projection.
//!
//! A sprite is a world-space point plus an on-screen size; it always
//! faces the camera. The projection runs the camera basis backwards:
//! invert the 2×2 `(right, front)` matrix, express the sprite's offset
//! in camera coordinates, and divide by the resulting depth.

use glam::{Mat2, Vec2, Vec3, vec2};

use crate::engine::Scene;
use crate::renderer::DrawPrimitive;
use crate::world::TextureId;

/// Project one sprite. `origin` is the normalized anchor inside the
/// sprite's on-screen rectangle (`(0.5, 0.5)` centers it, `(0.5, 1.0)`
/// plants the bottom edge on the position). Returns `None` for sprites
/// at or behind the camera plane — degenerate projections are dropped,
/// never emitted as non-finite geometry.
pub fn project(
    scene: &Scene,
    tex: TextureId,
    pos: Vec3,
    size: Vec2,
    origin: Vec2,
) -> Option<DrawPrimitive> {
    let cam = scene.camera;
    let front = cam.front.normalize_or_zero();
    let right = cam.right.normalize_or_zero();

    let basis = Mat2::from_cols(vec2(right.x, front.x), vec2(right.y, front.y));
    if basis.determinant() == 0.0 {
        return None;
    }
    let mut transformed = basis.inverse() * (pos.truncate() - cam.pos.truncate());
    if !transformed.y.is_finite() || transformed.y <= 0.0 {
        return None;
    }
    // correct lateral placement for non-square FOV bases
    transformed.x *= cam.front.length() / cam.right.length();

    let depth = transformed.y;
    let projected = vec2(
        transformed.x / depth,
        (cam.pos.z - pos.z) / depth + cam.facing,
    );
    let screen_size = (size / depth).abs();

    Some(DrawPrimitive::rect(
        depth,
        Some(tex),
        glam::Vec4::ONE,
        1.0,
        projected - screen_size * origin,
        projected + screen_size * (Vec2::ONE - origin),
        Vec2::ZERO,
        Vec2::ONE,
    ))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::PrimitiveShape;
    use crate::world::{Backdrop, Camera, TextureBank, WorldGrid};
    use glam::{uvec2, vec3};

    struct Parts {
        grid: WorldGrid,
        cam: Camera,
        backdrop: Backdrop,
        textures: TextureBank,
    }

    fn parts() -> Parts {
        let mut grid = WorldGrid::new();
        grid.resize(uvec2(4, 4));
        Parts {
            grid,
            cam: Camera::default(),
            backdrop: Backdrop::new(),
            textures: TextureBank::new(),
        }
    }

    fn scene(p: &Parts) -> Scene<'_> {
        Scene {
            grid: &p.grid,
            camera: &p.cam,
            backdrop: &p.backdrop,
            textures: &p.textures,
        }
    }

    #[test]
    fn behind_camera_is_rejected() {
        let p = parts();
        // default pose looks down -y; +y is behind the eye
        let prim = project(&scene(&p), 0, vec3(0.0, 1.0, 0.5), Vec2::ONE, vec2(0.5, 0.5));
        assert!(prim.is_none());
        let prim = project(&scene(&p), 0, vec3(0.0, 0.0, 0.5), Vec2::ONE, vec2(0.5, 0.5));
        assert!(prim.is_none());
    }

    #[test]
    fn centered_sprite_two_units_out() {
        let p = parts();
        let prim = project(&scene(&p), 0, vec3(0.0, -2.0, 0.5), Vec2::ONE, vec2(0.5, 0.5))
            .expect("in front of the camera");
        assert_eq!(prim.dis, 2.0);
        let PrimitiveShape::Rect { p1, p2, .. } = prim.shape else {
            unreachable!()
        };
        // size halves with depth 2, anchor splits it evenly
        assert!((p1 - vec2(-0.25, -0.25)).length() < 1e-5);
        assert!((p2 - vec2(0.25, 0.25)).length() < 1e-5);
    }

    #[test]
    fn bottom_anchor_hangs_the_rect_above_the_point() {
        let p = parts();
        let prim = project(&scene(&p), 0, vec3(0.0, -2.0, 0.5), Vec2::ONE, vec2(0.5, 1.0))
            .expect("in front of the camera");
        let PrimitiveShape::Rect { p1, p2, .. } = prim.shape else {
            unreachable!()
        };
        assert!((p1 - vec2(-0.25, -0.5)).length() < 1e-5);
        assert!((p2 - vec2(0.25, 0.0)).length() < 1e-5);
    }

    #[test]
    fn narrow_fov_pushes_sprites_outward() {
        let mut p = parts();
        p.cam.right *= 0.5;
        let prim = project(&scene(&p), 0, vec3(1.0, -2.0, 0.5), Vec2::ONE, vec2(0.5, 0.5))
            .expect("in front of the camera");
        let PrimitiveShape::Rect { p1, p2, .. } = prim.shape else {
            unreachable!()
        };
        let center = (p1 + p2) * 0.5;
        // lateral 1 at depth 2 would project to x=0.5; halving |right|
        // doubles it
        assert!((center.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotated_camera_keeps_depth_positive_ahead() {
        let mut p = parts();
        p.cam.rotate(std::f32::consts::FRAC_PI_2);
        // front is now +x
        let prim = project(&scene(&p), 0, vec3(3.0, 0.0, 0.5), Vec2::ONE, vec2(0.5, 0.5))
            .expect("sprite straight ahead after rotation");
        assert!((prim.dis - 3.0).abs() < 1e-5);
    }
}
