//! Draw-list accumulation, sorting and dispatch.
//!
//! The compositor owns the per-frame primitive list. Sprites may be
//! queued at any point before [`Compositor::render`]; the render call
//! assembles walls and backdrop, sorts everything far-to-near (painter's
//! algorithm — there is no depth buffer, later draws occlude earlier
//! ones) and hands each primitive to the draw surface. The sort is
//! stable so backdrop layers pushed in order stay in order.

use std::cmp::Ordering;

use glam::{Vec2, Vec3};

use crate::engine::{Scene, planes, sprites, walls};
use crate::renderer::{DrawCaps, DrawPrimitive, DrawSurface, PrimitiveShape};
use crate::world::TextureId;

#[derive(Default)]
pub struct Compositor {
    draws: Vec<DrawPrimitive>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a billboard sprite for this frame. Sprites behind the
    /// camera are silently dropped.
    pub fn sprite(
        &mut self,
        scene: &Scene,
        tex: TextureId,
        pos: Vec3,
        size: Vec2,
        origin: Vec2,
    ) {
        if let Some(prim) = sprites::project(scene, tex, pos, size, origin) {
            self.draws.push(prim);
        }
    }

    /// Queue an arbitrary pre-built primitive.
    pub fn push(&mut self, prim: DrawPrimitive) {
        self.draws.push(prim);
    }

    /// Render one frame: cast every screen column, project floor,
    /// ceiling and sky behind them, sort, dispatch, clear. Nothing
    /// survives into the next frame.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, scene: &Scene, surface: &mut S) {
        let bounds = walls::assemble(scene, &mut self.draws);
        planes::sky(scene, &mut self.draws);
        planes::floors_and_ceilings(scene, bounds, &mut self.draws);

        self.draws
            .sort_by(|a, b| b.dis.partial_cmp(&a.dis).unwrap_or(Ordering::Equal));

        let caps = surface.caps();
        for prim in self.draws.drain(..) {
            dispatch(&prim, scene, caps, surface);
        }
    }
}

fn dispatch<S: DrawSurface + ?Sized>(
    prim: &DrawPrimitive,
    scene: &Scene,
    caps: DrawCaps,
    surface: &mut S,
) {
    // a registered but never-loaded texture falls back like a missing one
    let tex = prim
        .texture
        .and_then(|id| scene.textures.texture(id).ok())
        .filter(|t| t.has_pixels());

    match prim.shape {
        PrimitiveShape::Rect { p1, p2, t1, t2 } => match tex {
            Some(tex) if caps.contains(DrawCaps::TEXTURE_RECT) => {
                surface.texture_rect(tex, p1, p2, t1, t2, prim.alpha);
            }
            _ if caps.contains(DrawCaps::FILL_RECT) => {
                surface.fill_rect(prim.color, p1, p2);
            }
            _ => {}
        },
        PrimitiveShape::Quad { pos, uv } => {
            if let Some(tex) = tex {
                if caps.contains(DrawCaps::TEXTURE_QUAD) {
                    surface.texture_quad(tex, pos, uv, prim.alpha);
                }
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Backdrop, Camera, Texture, TextureBank, WorldGrid};
    use glam::{Vec4, uvec2, vec2, vec4};

    struct Parts {
        grid: WorldGrid,
        cam: Camera,
        backdrop: Backdrop,
        textures: TextureBank,
    }

    fn parts() -> Parts {
        let mut grid = WorldGrid::new();
        grid.resize(uvec2(2, 2));
        Parts {
            grid,
            cam: Camera {
                res: uvec2(2, 2),
                render_distance: 4,
                ..Camera::default()
            },
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

    #[derive(Default)]
    struct Recorder {
        caps: DrawCaps,
        fills: Vec<Vec4>,
        tex_rects: usize,
        quads: usize,
    }

    impl DrawSurface for Recorder {
        fn caps(&self) -> DrawCaps {
            self.caps
        }
        fn fill_rect(&mut self, color: Vec4, _p1: Vec2, _p2: Vec2) {
            self.fills.push(color);
        }
        fn texture_rect(
            &mut self,
            _tex: &Texture,
            _p1: Vec2,
            _p2: Vec2,
            _t1: Vec2,
            _t2: Vec2,
            _alpha: f32,
        ) {
            self.tex_rects += 1;
        }
        fn texture_quad(&mut self, _tex: &Texture, _pos: [Vec2; 4], _uv: [Vec2; 4], _alpha: f32) {
            self.quads += 1;
        }
    }

    fn tagged_rect(dis: f32) -> DrawPrimitive {
        DrawPrimitive::rect(
            dis,
            None,
            vec4(dis, 0.0, 0.0, 1.0),
            1.0,
            vec2(-0.1, -0.1),
            vec2(0.1, 0.1),
            Vec2::ZERO,
            Vec2::ONE,
        )
    }

    #[test]
    fn dispatch_order_is_far_to_near() {
        let p = parts();
        let mut comp = Compositor::new();
        comp.push(tagged_rect(3.0));
        comp.push(tagged_rect(1.0));
        comp.push(tagged_rect(2.0));

        let mut rec = Recorder {
            caps: DrawCaps::FILL_RECT,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut rec);

        // two flat backdrop rects first, then the tagged ones 3, 2, 1
        assert_eq!(rec.fills.len(), 5);
        let tags: Vec<f32> = rec.fills.iter().skip(2).map(|c| c.x).collect();
        assert_eq!(tags, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn no_capabilities_draws_nothing() {
        let p = parts();
        let mut comp = Compositor::new();
        comp.push(tagged_rect(1.0));

        let mut rec = Recorder::default();
        comp.render(&scene(&p), &mut rec);
        assert!(rec.fills.is_empty());
        assert_eq!(rec.tex_rects, 0);
        assert_eq!(rec.quads, 0);
    }

    #[test]
    fn textured_rect_prefers_texture_then_falls_back_flat() {
        let mut p = parts();
        let tex = p.textures.insert("T", Texture::default()).unwrap();
        let prim = DrawPrimitive::rect(
            1.0,
            Some(tex),
            Vec4::ONE,
            1.0,
            vec2(-0.5, -0.5),
            vec2(0.5, 0.5),
            Vec2::ZERO,
            Vec2::ONE,
        );

        let mut comp = Compositor::new();
        comp.push(prim.clone());
        let mut rec = Recorder {
            caps: DrawCaps::TEXTURE_RECT | DrawCaps::FILL_RECT,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut rec);
        assert_eq!(rec.tex_rects, 1);

        comp.push(prim);
        let mut flat_only = Recorder {
            caps: DrawCaps::FILL_RECT,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut flat_only);
        assert_eq!(flat_only.tex_rects, 0);
        // sprite rect + two backdrop rects all land in fill_rect
        assert_eq!(flat_only.fills.len(), 3);
    }

    #[test]
    fn unloaded_texture_falls_back_flat() {
        let mut p = parts();
        let tex = p
            .textures
            .insert(
                "EMPTY",
                Texture {
                    name: "EMPTY".into(),
                    w: 4,
                    h: 4,
                    channels: 4,
                    pixels: Vec::new(),
                },
            )
            .unwrap();

        let mut comp = Compositor::new();
        comp.push(DrawPrimitive::rect(
            1.0,
            Some(tex),
            Vec4::ONE,
            1.0,
            vec2(-0.5, -0.5),
            vec2(0.5, 0.5),
            Vec2::ZERO,
            Vec2::ONE,
        ));
        let mut rec = Recorder {
            caps: DrawCaps::TEXTURE_RECT | DrawCaps::FILL_RECT,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut rec);
        assert_eq!(rec.tex_rects, 0);
        assert_eq!(rec.fills.len(), 3);
    }

    #[test]
    fn quads_need_the_quad_capability() {
        let mut p = parts();
        let tex = p.textures.insert("F", Texture::default()).unwrap();
        let quad = DrawPrimitive::quad(
            2.0,
            tex,
            Vec4::ONE,
            [vec2(-1.0, 0.5); 4],
            [Vec2::ZERO; 4],
        );

        let mut comp = Compositor::new();
        comp.push(quad.clone());
        let mut rec = Recorder {
            caps: DrawCaps::FILL_RECT,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut rec);
        assert_eq!(rec.quads, 0);

        comp.push(quad);
        let mut rec = Recorder {
            caps: DrawCaps::TEXTURE_QUAD,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut rec);
        assert_eq!(rec.quads, 1);
    }

    #[test]
    fn draw_list_is_cleared_between_frames() {
        let p = parts();
        let mut comp = Compositor::new();
        comp.push(tagged_rect(5.0));

        let mut rec = Recorder {
            caps: DrawCaps::FILL_RECT,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut rec);
        let first_frame = rec.fills.len();

        let mut rec2 = Recorder {
            caps: DrawCaps::FILL_RECT,
            ..Recorder::default()
        };
        comp.render(&scene(&p), &mut rec2);
        // only the backdrop remains on the second frame
        assert_eq!(first_frame, 3);
        assert_eq!(rec2.fills.len(), 2);
    }
}
