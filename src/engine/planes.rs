//! Floor, ceiling and sky projection.
//!
//! Textured planes are built from horizontal screen bands: each band row
//! is projected onto the `z = 0` (floor) or `z = 1` (ceiling) plane,
//! the view-frustum extremes at that distance become world-space texture
//! coordinates, and consecutive rows pair up into one quad. Bands only
//! run up to the boundary reported by the wall assembler — everything
//! horizon-ward of the farthest wall slice is wall, not plane.
//!
//! Untextured layers skip the per-row work entirely and emit one flat
//! rectangle over the whole visible band.

use glam::{Vec2, vec2};
use std::f32::consts::PI;

use crate::engine::Scene;
use crate::engine::walls::PlaneBounds;
use crate::renderer::DrawPrimitive;
use crate::world::PlaneLayer;

/// Sort distance for backdrop primitives that must land behind every
/// wall and sprite.
const BACKDROP_DIS: f32 = f32::MAX;

/// Sky layer: one full-screen textured rect whose horizontal texture
/// window follows the view direction, wrapping once over a half turn.
/// Without a sky texture the ceiling layer is the fallback, so nothing
/// is emitted here.
pub fn sky(scene: &Scene, out: &mut Vec<DrawPrimitive>) {
    let Some(tex) = scene.backdrop.sky_texture else {
        return;
    };
    let front = scene.camera.front;
    let u = (-front.y).atan2(-front.x) / PI;
    out.push(DrawPrimitive::rect(
        BACKDROP_DIS,
        Some(tex),
        scene.backdrop.sky_color,
        1.0,
        vec2(-1.0, -1.0),
        vec2(1.0, 1.0),
        vec2(u - 1.0, 0.0),
        vec2(u - 0.5, 1.0),
    ));
}

/// Project both planes up to the wall boundary.
pub fn floors_and_ceilings(scene: &Scene, bounds: PlaneBounds, out: &mut Vec<DrawPrimitive>) {
    let cam = scene.camera;
    let step = 2.0 / cam.res.y as f32;
    let eye = cam.pos.truncate();
    let left_dir = cam.front - cam.right;
    let right_dir = cam.front + cam.right;

    // floor: from the bottom edge of the screen up to the boundary
    let layer = &scene.backdrop.floor;
    match layer.texture {
        None => out.push(flat_band(layer, vec2(-1.0, bounds.floor), vec2(1.0, 1.0))),
        Some(tex) => {
            let mut prev: Option<(f32, Vec2, Vec2)> = None;
            let mut y = 1.0;
            while y > bounds.floor {
                let denom = y - cam.facing;
                if denom <= 0.0 {
                    break;
                }
                let dis = (cam.pos.z * 2.0) / denom;
                let left = (eye + left_dir * dis) / layer.scale;
                let right = (eye + right_dir * dis) / layer.scale;
                if let Some((py, pl, pr)) = prev {
                    out.push(DrawPrimitive::quad(
                        dis,
                        tex,
                        layer.color,
                        [vec2(-1.0, py), vec2(1.0, py), vec2(1.0, y), vec2(-1.0, y)],
                        [pl, pr, right, left],
                    ));
                }
                prev = Some((y, left, right));
                y -= step;
            }
        }
    }

    // ceiling: from the top edge of the screen down to the boundary
    let layer = &scene.backdrop.ceiling;
    match layer.texture {
        None => out.push(flat_band(layer, vec2(-1.0, -1.0), vec2(1.0, bounds.ceil))),
        Some(tex) => {
            let mut prev: Option<(f32, Vec2, Vec2)> = None;
            let mut y = -1.0;
            while y < bounds.ceil {
                let denom = cam.facing - y;
                if denom <= 0.0 {
                    break;
                }
                let dis = ((1.0 - cam.pos.z) * 2.0) / denom;
                let left = (eye + left_dir * dis) / layer.scale;
                let right = (eye + right_dir * dis) / layer.scale;
                if let Some((py, pl, pr)) = prev {
                    out.push(DrawPrimitive::quad(
                        dis,
                        tex,
                        layer.color,
                        [vec2(-1.0, py), vec2(1.0, py), vec2(1.0, y), vec2(-1.0, y)],
                        [pl, pr, right, left],
                    ));
                }
                prev = Some((y, left, right));
                y += step;
            }
        }
    }
}

fn flat_band(layer: &PlaneLayer, p1: Vec2, p2: Vec2) -> DrawPrimitive {
    DrawPrimitive::rect(
        BACKDROP_DIS,
        None,
        layer.color,
        layer.color.w,
        p1,
        p2,
        Vec2::ZERO,
        Vec2::ONE,
    )
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
