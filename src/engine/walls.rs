//! Per-column wall assembly.
//!
//! One ray per screen column; every non-miss hit in the returned chain
//! becomes one vertical slice rect. Slice height is the classic
//! inverse-distance perspective divide, which is fisheye-free exactly
//! because hit distances are ray parameters of `front + right * offset`
//! rather than Euclidean lengths.
//!
//! Casts only read the grid, so columns are mutually independent — this
//! loop is the natural seam for data-parallel execution, provided each
//! column accumulates into its own buffer before merging. The current
//! pass stays single-threaded and appends in column order.

use glam::vec2;

use crate::engine::Scene;
use crate::engine::caster::cast_ray;
use crate::renderer::DrawPrimitive;

/// Hits this close to the eye are degenerate; the perspective divide
/// would explode.
const MIN_SLICE_DIS: f32 = 1e-4;

/// Screen-space extent of the farthest wall slice of the frame — the
/// horizon-ward boundary the floor/ceiling bands fill up to.
#[derive(Clone, Copy, Debug)]
pub struct PlaneBounds {
    pub ceil: f32,
    pub floor: f32,
}

/// Cast all columns, append one rect per pierced surface, and report the
/// plane boundary. With no wall in sight both bounds collapse to the
/// horizon line `facing`.
pub fn assemble(scene: &Scene, out: &mut Vec<DrawPrimitive>) -> PlaneBounds {
    let cam = scene.camera;
    let line_w = cam.column_width();

    let mut far_dis = f32::NEG_INFINITY;
    let mut bounds = PlaneBounds {
        ceil: cam.facing,
        floor: cam.facing,
    };

    for col in 0..cam.res.x {
        let offset = cam.column_offset(col);
        let dir = cam.ray_dir(offset);
        let hits = cast_ray(scene.grid, cam.pos.truncate(), dir, cam.render_distance);

        for hit in &hits {
            let Some(surface_idx) = hit.surface else {
                continue;
            };
            if hit.dis <= MIN_SLICE_DIS {
                continue;
            }
            let wall = scene.grid.cell(hit.tile.as_uvec2());
            let Some(surface) = wall.surfaces.get(surface_idx) else {
                continue;
            };

            let center = (cam.pos.z - 0.5) * 2.0 / hit.dis + cam.facing;
            let half = 1.0 / hit.dis;
            let p1 = vec2(offset, center - half);
            let p2 = vec2(offset + line_w, center + half);

            // sample a one-texel-wide window starting at the hit coordinate
            let u_step = surface
                .texture
                .and_then(|id| scene.textures.texture(id).ok())
                .map_or(0.0, |t| 1.0 / t.w as f32);
            let t1 = vec2(hit.tex_coord, 0.0);
            let t2 = vec2(hit.tex_coord + u_step, 1.0);

            // a fully reflective surface must not also render as
            // translucent flat color
            let alpha = surface.color.w.min(1.0 - surface.reflection);
            let mut color = surface.color;
            color.w = alpha;

            out.push(DrawPrimitive::rect(
                hit.dis,
                surface.texture,
                color,
                alpha,
                p1,
                p2,
                t1,
                t2,
            ));

            if hit.dis > far_dis {
                far_dis = hit.dis;
                bounds = PlaneBounds {
                    ceil: p1.y,
                    floor: p2.y,
                };
            }
        }
    }

    bounds
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
