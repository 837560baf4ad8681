//! Minimal interactive viewer for the raycasting core.
//!
//! ```bash
//! cargo run --release -- --width 960 --height 600
//! ```
//!
//! Renders a small authored arena into a minifb window through a
//! flat-fill-only [`DrawSurface`] — every wall slice and backdrop band
//! arrives as an alpha-blended rectangle. WASD moves, ←/→ turn.

use clap::Parser;
use minifb::{Key, Window, WindowOptions};
use std::time::{Duration, Instant};

use glam::{Vec2, Vec4, uvec2, vec2, vec3, vec4};

use polycast::world::{Backdrop, Camera, FillState, Surface, TextureBank, WorldGrid};
use polycast::{Compositor, DrawCaps, DrawSurface, Scene};

#[derive(Parser)]
#[command(about = "spin around a tiny raycast arena")]
struct Args {
    /// window width in pixels
    #[arg(long, default_value_t = 960)]
    width: usize,

    /// window height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// ray columns (defaults to half the window width)
    #[arg(long)]
    columns: Option<u32>,

    /// field of view as |right| relative to |front|
    #[arg(long, default_value_t = 1.0)]
    fov: f32,
}

/// Flat-color back-end: NDC rectangles become alpha-blended pixel runs.
struct FlatBlitter {
    buf: Vec<u32>,
    w: usize,
    h: usize,
}

impl FlatBlitter {
    fn new(w: usize, h: usize) -> Self {
        Self {
            buf: vec![0; w * h],
            w,
            h,
        }
    }

    fn clear(&mut self) {
        self.buf.fill(0xFF_10_10_18);
    }

    fn to_px(&self, p: Vec2) -> (i32, i32) {
        (
            ((p.x + 1.0) * 0.5 * self.w as f32) as i32,
            ((p.y + 1.0) * 0.5 * self.h as f32) as i32,
        )
    }
}

impl DrawSurface for FlatBlitter {
    fn caps(&self) -> DrawCaps {
        DrawCaps::FILL_RECT
    }

    fn fill_rect(&mut self, color: Vec4, p1: Vec2, p2: Vec2) {
        let (x0, y0) = self.to_px(p1);
        let (x1, y1) = self.to_px(p2);
        let (x0, x1) = (x0.clamp(0, self.w as i32), x1.clamp(0, self.w as i32));
        let (y0, y1) = (y0.clamp(0, self.h as i32), y1.clamp(0, self.h as i32));
        let a = color.w.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let src = [color.x, color.y, color.z].map(|c| c.clamp(0.0, 1.0) * 255.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let px = &mut self.buf[y as usize * self.w + x as usize];
                let dst = [(*px >> 16) & 0xFF, (*px >> 8) & 0xFF, *px & 0xFF];
                let blend = |s: f32, d: u32| (s * a + d as f32 * (1.0 - a)) as u32;
                *px = 0xFF00_0000
                    | (blend(src[0], dst[0]) << 16)
                    | (blend(src[1], dst[1]) << 8)
                    | blend(src[2], dst[2]);
            }
        }
    }
}

fn opaque(r: f32, g: f32, b: f32) -> Surface {
    Surface::colored(vec4(r, g, b, 1.0))
}

fn build_arena() -> WorldGrid {
    let mut grid = WorldGrid::new();
    grid.resize(uvec2(12, 12));

    // outer wall ring, grey with distinct face tints
    for i in 0..12 {
        for pos in [
            uvec2(i, 0),
            uvec2(i, 11),
            uvec2(0, i),
            uvec2(11, i),
        ] {
            let cell = grid.cell_mut(pos);
            cell.fill = FillState::Filled;
            cell.surfaces = vec![
                opaque(0.55, 0.55, 0.60),
                opaque(0.45, 0.45, 0.50),
                opaque(0.50, 0.50, 0.55),
                opaque(0.40, 0.40, 0.45),
            ];
        }
    }

    // red block
    let cell = grid.cell_mut(uvec2(3, 4));
    cell.fill = FillState::Filled;
    cell.surfaces = vec![opaque(0.8, 0.2, 0.2)];

    // translucent green pane across one cell
    let cell = grid.cell_mut(uvec2(7, 5));
    cell.fill = FillState::Segments;
    cell.points = vec![vec2(0.0, 0.5), vec2(1.0, 0.5)];
    cell.surfaces = vec![Surface::colored(vec4(0.2, 0.9, 0.3, 0.45))];

    // eight-sided pillar
    let cell = grid.cell_mut(uvec2(5, 8));
    cell.fill = FillState::Shape;
    cell.points = vec![
        vec2(0.30, 0.10),
        vec2(0.70, 0.10),
        vec2(0.90, 0.30),
        vec2(0.90, 0.70),
        vec2(0.70, 0.90),
        vec2(0.30, 0.90),
        vec2(0.10, 0.70),
        vec2(0.10, 0.30),
    ];
    cell.surfaces = (0..8)
        .map(|i| opaque(0.3 + 0.06 * i as f32, 0.4, 0.8))
        .collect();

    // mirror strip
    let cell = grid.cell_mut(uvec2(9, 8));
    cell.fill = FillState::Filled;
    cell.surfaces = vec![Surface {
        color: vec4(0.9, 0.9, 1.0, 1.0),
        texture: None,
        reflection: 1.0,
    }];

    grid
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let grid = build_arena();
    let mut textures = TextureBank::new();
    let marker_tex = textures.insert("MARKER", Default::default())?;

    let columns = args.columns.unwrap_or((args.width / 2) as u32);
    let mut camera = Camera {
        pos: vec3(6.0, 6.0, 0.5),
        res: uvec2(columns, (args.height / 2) as u32),
        render_distance: 48,
        ..Camera::default()
    };
    camera.right *= args.fov;

    let mut backdrop = Backdrop::new();
    backdrop.floor.color = vec4(0.24, 0.20, 0.16, 1.0);
    backdrop.ceiling.color = vec4(0.10, 0.12, 0.20, 1.0);

    let mut compositor = Compositor::new();
    let mut blitter = FlatBlitter::new(args.width, args.height);

    let mut win = Window::new(
        "polycast arena",
        args.width,
        args.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut clock = 0.0f32;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* movement --------------------------------------------------------- */
        let speed = 0.06;
        let fwd = camera.front.normalize_or_zero() * speed;
        let side = camera.right.normalize_or_zero() * speed;
        if win.is_key_down(Key::W) {
            camera.pos += fwd.extend(0.0);
        }
        if win.is_key_down(Key::S) {
            camera.pos -= fwd.extend(0.0);
        }
        if win.is_key_down(Key::A) {
            camera.pos -= side.extend(0.0);
        }
        if win.is_key_down(Key::D) {
            camera.pos += side.extend(0.0);
        }
        if win.is_key_down(Key::Left) {
            camera.rotate(-0.04);
        }
        if win.is_key_down(Key::Right) {
            camera.rotate(0.04);
        }

        /* one frame -------------------------------------------------------- */
        clock += 1.0 / 60.0;
        let scene = Scene {
            grid: &grid,
            camera: &camera,
            backdrop: &backdrop,
            textures: &textures,
        };

        // a marker bobbing over the pillar; falls back to a flat blob
        // because this surface only fills rectangles
        compositor.sprite(
            &scene,
            marker_tex,
            vec3(5.5, 8.5, 0.75 + 0.1 * clock.sin()),
            Vec2::splat(0.4),
            vec2(0.5, 0.5),
        );

        blitter.clear();
        compositor.render(&scene, &mut blitter);
        win.update_with_buffer(&blitter.buf, blitter.w, blitter.h)?;

        /* frame accounting -------------------------------------------------- */
        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(1) {
            let avg = acc_time.as_secs_f64() * 1e3 / acc_frames as f64;
            println!("{acc_frames} fps, {avg:.2} ms/frame");
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
