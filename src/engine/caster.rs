//! Grid DDA traversal with per-cell geometry intersection.
//!
//! A cast walks the wall grid one cell boundary at a time, always
//! advancing the axis whose next grid line is nearer in ray parameter.
//! Cells answer with their fill state: a `Filled` block terminates at the
//! cell boundary, the geometry variants run line–segment intersection
//! against their edges, `Empty` lets the ray pass. A struck surface that
//! is reflective or translucent continues the cast recursively, all
//! continuations sharing one tile-step budget so a ray bouncing between
//! two facing mirrors still terminates.
//!
//! Distances are along-ray parameters (`pos = origin + dir * t`), not
//! Euclidean lengths — the projection in `engine::walls` relies on that.

use glam::{IVec2, Vec2, ivec2};
use smallvec::SmallVec;

use crate::world::{FillState, Wall, WorldGrid};

/// How far past the current cell the ray is extended when testing
/// in-cell geometry edges, in world units.
const GEOMETRY_REACH: f32 = 100.0;

/// Nudge past a pierced surface before the continuation cast, so the
/// child ray does not re-hit the same edge.
const CONTINUE_NUDGE: f32 = 0.01;

/// One terminated ray segment.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// Tile that produced the hit (or the last tile stepped on a miss).
    pub tile: IVec2,
    /// World-space hit point.
    pub pos: Vec2,
    /// Index into the struck cell's `surfaces`; `None` marks a miss.
    pub surface: Option<usize>,
    /// 1-D coordinate along the struck face/edge, `0..1`.
    pub tex_coord: f32,
    /// Along-ray parameter from the *original* origin, accumulated
    /// across continuations.
    pub dis: f32,
    /// True when the struck face is crossed by a y-step (or the edge
    /// runs mostly along x).
    pub vertical: bool,
}

impl RayHit {
    #[inline]
    pub fn is_miss(&self) -> bool {
        self.surface.is_none()
    }
}

/// Chain of surfaces pierced by one ray, closest first. Almost every ray
/// terminates on its first opaque hit, so the chain lives inline.
pub type HitChain = SmallVec<[RayHit; 2]>;

/// Cast a ray from `origin` along `dir` (any non-zero length; the hit
/// parameters are in multiples of `dir`). Returns the ordered chain of
/// pierced surfaces; the last entry is a miss marker if the budget ran
/// out before anything opaque was struck.
pub fn cast_ray(grid: &WorldGrid, origin: Vec2, dir: Vec2, render_distance: u32) -> HitChain {
    let mut hits = HitChain::new();
    cast_into(grid, origin, dir, 0.0, 0, render_distance, &mut hits);
    hits
}

/// Candidate hit inside the DDA loop, before continuation is resolved.
struct Found {
    surface: usize,
    tex_coord: f32,
    t: f32,
    pos: Vec2,
    vertical: bool,
}

fn cast_into(
    grid: &WorldGrid,
    origin: Vec2,
    dir: Vec2,
    start_dis: f32,
    start_steps: u32,
    render_distance: u32,
    out: &mut HitChain,
) {
    // A zero direction would never leave the starting cell.
    if dir.x == 0.0 && dir.y == 0.0 {
        out.push(RayHit {
            tile: origin.floor().as_ivec2(),
            pos: origin,
            surface: None,
            tex_coord: 0.0,
            dis: start_dis,
            vertical: false,
        });
        return;
    }

    let mut tile = origin.floor().as_ivec2();
    // Parameter cost of crossing one grid unit per axis; infinite on a
    // zero component so that axis can never win the comparison below.
    let tile_delta = (1.0 / dir).abs();

    let mut step = ivec2(0, 0);
    let mut edge = Vec2::ZERO;
    if dir.x == 0.0 {
        step.x = 1;
        edge.x = f32::INFINITY;
    } else if dir.x < 0.0 {
        step.x = -1;
        edge.x = (origin.x - tile.x as f32) * tile_delta.x;
    } else {
        step.x = 1;
        edge.x = (tile.x as f32 + 1.0 - origin.x) * tile_delta.x;
    }
    if dir.y == 0.0 {
        step.y = 1;
        edge.y = f32::INFINITY;
    } else if dir.y < 0.0 {
        step.y = -1;
        edge.y = (origin.y - tile.y as f32) * tile_delta.y;
    } else {
        step.y = 1;
        edge.y = (tile.y as f32 + 1.0 - origin.y) * tile_delta.y;
    }

    let mut steps = start_steps;
    let mut vertical = false;
    let mut entry_t = 0.0;
    let mut entry_pos = origin;
    let mut found: Option<Found> = None;

    while found.is_none() && steps < render_distance {
        // Exact corner ties take the else branch (a y-step), same as the
        // `<` comparison has always decided here. Pinned by a test below.
        if edge.x < edge.y {
            entry_t = edge.x;
            edge.x += tile_delta.x;
            tile.x += step.x;
            vertical = false;
        } else {
            entry_t = edge.y;
            edge.y += tile_delta.y;
            tile.y += step.y;
            vertical = true;
        }
        entry_pos = origin + dir * entry_t;
        steps += 1;

        if !grid.contains(tile) {
            continue;
        }

        let wall = grid.cell(tile.as_uvec2());
        match wall.fill {
            FillState::Filled => {
                let tex_coord = if vertical {
                    entry_pos.x - entry_pos.x.floor()
                } else {
                    entry_pos.y - entry_pos.y.floor()
                };
                let positive = if vertical { step.y > 0 } else { step.x > 0 };
                found = Some(Found {
                    surface: wall.facing_surface(vertical, positive),
                    tex_coord,
                    t: entry_t,
                    pos: entry_pos,
                    vertical,
                });
            }
            FillState::Segments | FillState::Strip | FillState::Shape => {
                found = intersect_cell_geometry(wall, tile, origin, dir, entry_t);
            }
            FillState::Empty => {}
        }
    }

    let Some(found) = found else {
        out.push(RayHit {
            tile,
            pos: entry_pos,
            surface: None,
            tex_coord: 0.0,
            dis: entry_t + start_dis,
            vertical,
        });
        return;
    };

    let dis = found.t + start_dis;

    // A hit whose surface entry is missing is authoring breakage; treat
    // it as opaque and diffuse rather than panicking mid-frame.
    let (reflect, transmit) = grid
        .cell(tile.as_uvec2())
        .surfaces
        .get(found.surface)
        .map_or((false, false), |s| (s.reflection > 0.0, s.color.w < 1.0));

    out.push(RayHit {
        tile,
        pos: found.pos,
        surface: Some(found.surface),
        tex_coord: found.tex_coord,
        dis,
        vertical: found.vertical,
    });

    if reflect || transmit {
        // Mirror surfaces flip the ray along the struck axis; plain
        // translucency keeps it straight. The child cast inherits the
        // distance and the remaining tile budget.
        let mut next_dir = dir;
        if reflect {
            if found.vertical {
                next_dir.y = -next_dir.y;
            } else {
                next_dir.x = -next_dir.x;
            }
        }
        cast_into(
            grid,
            found.pos + next_dir * CONTINUE_NUDGE,
            next_dir,
            dis,
            steps,
            render_distance,
            out,
        );
    }
}

/// Nearest intersection between the ray and the edges of one
/// `Segments`/`Strip`/`Shape` cell, if any. `entry_t` is the ray
/// parameter at which the DDA entered the cell.
fn intersect_cell_geometry(
    wall: &Wall,
    tile: IVec2,
    origin: Vec2,
    dir: Vec2,
    entry_t: f32,
) -> Option<Found> {
    let base = tile.as_vec2();
    let t_max = entry_t + GEOMETRY_REACH;
    let mut best: Option<Found> = None;

    for (idx, a, b) in wall.edges() {
        let a = base + a;
        let b = base + b;
        let Some((t, u)) = ray_segment_intersect(origin, dir, a, b, t_max) else {
            continue;
        };
        if best.as_ref().map_or(true, |f| t < f.t) {
            let e = b - a;
            best = Some(Found {
                surface: idx,
                // u is the position along the edge measured on its
                // dominant axis — no foreshortening on near-axis edges.
                tex_coord: u,
                t,
                pos: origin + dir * t,
                vertical: e.x.abs() >= e.y.abs(),
            });
        }
    }
    best
}

/// Solve `p + t·r = a + u·(b−a)` for `t ∈ [0, t_max]`, `u ∈ [0, 1]`.
/// Parallel (or zero-length) edges yield no intersection.
fn ray_segment_intersect(p: Vec2, r: Vec2, a: Vec2, b: Vec2, t_max: f32) -> Option<(f32, f32)> {
    let s = b - a;
    let denom = r.perp_dot(s);
    if denom == 0.0 {
        return None;
    }
    let ap = a - p;
    let t = ap.perp_dot(s) / denom;
    let u = ap.perp_dot(r) / denom;
    (t >= 0.0 && t <= t_max && (0.0..=1.0).contains(&u)).then_some((t, u))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
