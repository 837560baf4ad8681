use glam::{Vec2, Vec3, Vec4};

use super::texture::TextureId;

/// Shape classification of one wall cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillState {
    /// No geometry, rays pass through.
    #[default]
    Empty,
    /// Axis-aligned full block covering the whole cell.
    Filled,
    /// Independent line segments: `points` holds disjoint pairs.
    Segments,
    /// Connected polyline: consecutive `points` share an endpoint.
    Strip,
    /// Closed polygon: like `Strip` plus an implicit edge back to the
    /// first point.
    Shape,
}

/// Appearance of one face (for `Filled`) or one edge (for the geometry
/// variants) of a wall cell.
///
/// * `color.w < 1` makes the surface partially transparent to the ray.
/// * `reflection > 0` mirrors the ray off the struck axis; 0 is diffuse.
#[derive(Clone, Debug)]
pub struct Surface {
    pub color: Vec4,
    pub texture: Option<TextureId>,
    pub reflection: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            texture: None,
            reflection: 0.0,
        }
    }
}

impl Surface {
    pub fn colored(color: Vec4) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn textured(texture: TextureId) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }
}

/// Per-cell fog parameters. Not consumed by the render pipeline itself —
/// kept as metadata for the embedding renderer to query via
/// [`Wall::fog_strength`].
#[derive(Clone, Debug, Default)]
pub struct Fog {
    pub color: Vec3,
    pub min_strength: f32,
    pub max_strength: f32,
    pub max_distance: f32,
}

/// One grid cell.
///
/// `points` are unit-cell-local, `[0,1]×[0,1]`; how they pair into edges
/// depends on `fill`. `surfaces` is indexed per face for `Filled`
/// (ray-travel order +y, −y, +x, −x, or a single entry for "any face")
/// and per edge for the geometry variants.
#[derive(Clone, Debug, Default)]
pub struct Wall {
    pub fill: FillState,
    pub points: Vec<Vec2>,
    pub surfaces: Vec<Surface>,
    pub fog: Fog,
}

impl Wall {
    pub fn new(fill: FillState) -> Self {
        Self {
            fill,
            ..Self::default()
        }
    }

    /// Surface index struck on a `Filled` cell, selected by which axis the
    /// DDA crossed and the sign of the ray along it. A single-surface cell
    /// uses that surface regardless of face.
    pub fn facing_surface(&self, vertical: bool, positive_step: bool) -> usize {
        if self.surfaces.len() == 1 {
            return 0;
        }
        match (vertical, positive_step) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }

    /// Edges implied by `points` under the current fill state, as
    /// `(surface_index, start, end)` in cell-local coordinates.
    /// `Empty` and `Filled` yield nothing.
    pub fn edges(&self) -> impl Iterator<Item = (usize, Vec2, Vec2)> + '_ {
        let count = if self.points.len() < 2 {
            0
        } else {
            match self.fill {
                FillState::Segments => self.points.len() / 2,
                FillState::Strip => self.points.len() - 1,
                FillState::Shape => self.points.len(),
                FillState::Empty | FillState::Filled => 0,
            }
        };

        (0..count).map(move |i| match self.fill {
            FillState::Segments => (i, self.points[2 * i], self.points[2 * i + 1]),
            FillState::Strip => (i, self.points[i], self.points[i + 1]),
            FillState::Shape => {
                let next = (i + 1) % self.points.len();
                (i, self.points[i], self.points[next])
            }
            FillState::Empty | FillState::Filled => unreachable!(),
        })
    }

    /// Fog strength at `dis`:
    /// `min + min(dis/max_dis, 1) * (max − min)`, or 0 when the cell
    /// carries no fog at all. A zero `max_distance` also yields 0 so the
    /// division can never blow up.
    pub fn fog_strength(&self, dis: f32) -> f32 {
        let f = &self.fog;
        if f.max_distance <= 0.0
            || (f.max_strength == 0.0 && f.min_strength == 0.0)
        {
            return 0.0;
        }
        f.min_strength + (dis / f.max_distance).min(1.0) * (f.max_strength - f.min_strength)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
