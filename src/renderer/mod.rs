//! Drawing abstraction layer.
//!
//! *The render core never touches a pixel.*
//! It produces a list of [`DrawPrimitive`]s per frame and hands each one
//! to a type that implements [`DrawSurface`].
//!
//! * You can plug any back-end (software blitter, GPU quads, SVG dump, …)
//!   without changing the projection code.
//! * Capabilities are opt-in: a surface advertises what it can draw via
//!   [`DrawSurface::caps`] and the compositor silently skips primitives
//!   nothing can handle. All three trait methods have no-op default
//!   bodies, so an implementor only overrides what it advertises.
//!
//! Screen positions are normalized device coordinates throughout:
//! `(-1, -1)` top-left to `(1, 1)` bottom-right.

use bitflags::bitflags;
use glam::{Vec2, Vec4};

use crate::world::{Texture, TextureId};

bitflags! {
    /// Which draw entry points a [`DrawSurface`] actually implements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DrawCaps: u8 {
        /// Axis-aligned rectangle filled with a flat color.
        const FILL_RECT    = 0x01;
        /// Axis-aligned rectangle sampling a texture window, with alpha.
        const TEXTURE_RECT = 0x02;
        /// Four independent corners with per-corner texture coordinates.
        const TEXTURE_QUAD = 0x04;
    }
}

impl Default for DrawCaps {
    /// No capabilities at all.
    fn default() -> Self {
        DrawCaps::empty()
    }
}

/// Receiver for the per-frame primitive stream.
pub trait DrawSurface {
    /// Capability set; the compositor never calls an entry point that is
    /// not advertised here.
    fn caps(&self) -> DrawCaps;

    /// Fill the axis-aligned rectangle `p1..p2` with `color`.
    fn fill_rect(&mut self, _color: Vec4, _p1: Vec2, _p2: Vec2) {}

    /// Draw the axis-aligned rectangle `p1..p2` sampling `tex` over the
    /// texture window `t1..t2`.
    fn texture_rect(
        &mut self,
        _tex: &Texture,
        _p1: Vec2,
        _p2: Vec2,
        _t1: Vec2,
        _t2: Vec2,
        _alpha: f32,
    ) {
    }

    /// Draw a quad with four independent corners and matching texture
    /// coordinates, in the winding the projector emitted them.
    fn texture_quad(&mut self, _tex: &Texture, _pos: [Vec2; 4], _uv: [Vec2; 4], _alpha: f32) {}
}

/// Screen-space geometry of one primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrimitiveShape {
    /// Two opposite corners plus a texture window.
    Rect { p1: Vec2, p2: Vec2, t1: Vec2, t2: Vec2 },
    /// Four corners with per-corner texture coordinates (floor/ceiling
    /// trapezoids).
    Quad { pos: [Vec2; 4], uv: [Vec2; 4] },
}

/// One visual element of the current frame.
///
/// Created during assembly, consumed by the compositor in the same frame;
/// nothing persists across frames.
#[derive(Clone, Debug)]
pub struct DrawPrimitive {
    /// Sort key: traversal / projection distance, farthest drawn first.
    pub dis: f32,
    pub texture: Option<TextureId>,
    pub color: Vec4,
    pub alpha: f32,
    pub shape: PrimitiveShape,
}

impl DrawPrimitive {
    pub fn rect(
        dis: f32,
        texture: Option<TextureId>,
        color: Vec4,
        alpha: f32,
        p1: Vec2,
        p2: Vec2,
        t1: Vec2,
        t2: Vec2,
    ) -> Self {
        Self {
            dis,
            texture,
            color,
            alpha,
            shape: PrimitiveShape::Rect { p1, p2, t1, t2 },
        }
    }

    pub fn quad(
        dis: f32,
        texture: TextureId,
        color: Vec4,
        pos: [Vec2; 4],
        uv: [Vec2; 4],
    ) -> Self {
        Self {
            dis,
            texture: Some(texture),
            color,
            alpha: 1.0,
            shape: PrimitiveShape::Quad { pos, uv },
        }
    }
}
