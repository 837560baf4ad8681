//! polycast — 2.5-D grid raycasting render core.
//!
//! Feed it a [`world::WorldGrid`] of wall cells, a [`world::Camera`] and a
//! [`world::Backdrop`]; it answers with an ordered stream of screen-space
//! [`renderer::DrawPrimitive`]s — wall slices, floor/ceiling bands, sky
//! and billboard sprites — delivered far-to-near to whatever implements
//! [`renderer::DrawSurface`]. Rasterization, texture decoding and
//! windowing stay on the embedding side.
//!
//! ```no_run
//! use glam::{uvec2, vec3};
//! use polycast::{Compositor, Scene};
//! use polycast::world::{Backdrop, Camera, FillState, Surface, TextureBank, WorldGrid};
//!
//! let mut grid = WorldGrid::new();
//! grid.resize(uvec2(8, 8));
//! let cell = grid.cell_mut(uvec2(3, 3));
//! cell.fill = FillState::Filled;
//! cell.surfaces.push(Surface::default());
//!
//! let camera = Camera {
//!     pos: vec3(4.5, 6.5, 0.5),
//!     ..Camera::default()
//! };
//! let backdrop = Backdrop::new();
//! let textures = TextureBank::new();
//!
//! let mut compositor = Compositor::new();
//! # struct NullSurface;
//! # impl polycast::renderer::DrawSurface for NullSurface {
//! #     fn caps(&self) -> polycast::renderer::DrawCaps {
//! #         polycast::renderer::DrawCaps::empty()
//! #     }
//! # }
//! # let mut surface = NullSurface;
//! let scene = Scene {
//!     grid: &grid,
//!     camera: &camera,
//!     backdrop: &backdrop,
//!     textures: &textures,
//! };
//! compositor.render(&scene, &mut surface);
//! ```

pub mod engine;
pub mod renderer;
pub mod world;

pub use engine::{Compositor, HitChain, RayHit, Scene, cast_ray};

pub use renderer::{DrawCaps, DrawPrimitive, DrawSurface, PrimitiveShape};
