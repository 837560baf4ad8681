use glam::{Vec4, vec4};

use super::texture::TextureId;

/// Appearance of the floor or the ceiling plane.
///
/// With a texture the plane is rendered as perspective-correct bands;
/// without one it collapses to a single flat-colored rectangle.
/// `scale` divides world coordinates when deriving texture coordinates,
/// so larger values stretch the image over more tiles.
#[derive(Clone, Copy, Debug)]
pub struct PlaneLayer {
    pub texture: Option<TextureId>,
    pub color: Vec4,
    pub scale: f32,
}

impl Default for PlaneLayer {
    fn default() -> Self {
        Self {
            texture: None,
            color: vec4(1.0, 1.0, 1.0, 1.0),
            scale: 1.0,
        }
    }
}

/// Everything drawn behind the walls: floor, ceiling and sky.
///
/// Part of the scene configuration passed into each render call — the
/// render core holds no global state.
#[derive(Clone, Copy, Debug)]
pub struct Backdrop {
    pub floor: PlaneLayer,
    pub ceiling: PlaneLayer,
    pub sky_texture: Option<TextureId>,
    pub sky_color: Vec4,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            floor: PlaneLayer::default(),
            ceiling: PlaneLayer::default(),
            sky_texture: None,
            sky_color: vec4(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }
}
