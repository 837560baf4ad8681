//! Frame pipeline: rays → screen-space primitives → sorted dispatch.

pub mod caster;
pub mod compositor;
pub mod planes;
pub mod sprites;
pub mod walls;

pub use caster::{HitChain, RayHit, cast_ray};
pub use compositor::Compositor;

use crate::world::{Backdrop, Camera, TextureBank, WorldGrid};

/// Borrowed view of everything one frame needs. Built fresh per call —
/// the pipeline keeps no global state between frames.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub grid: &'a WorldGrid,
    pub camera: &'a Camera,
    pub backdrop: &'a Backdrop,
    pub textures: &'a TextureBank,
}
