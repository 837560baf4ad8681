use glam::{IVec2, UVec2};

use super::wall::Wall;

/// Rectangular map of wall cells, row-major, addressed by integer (x, y).
///
/// The grid starts zero-sized; [`WorldGrid::resize`] must be called before
/// any cell access. Cell lookups do no bounds checking of their own — the
/// ray caster is the only internal caller that has to reason about world
/// edges and it tests [`WorldGrid::contains`] first.
#[derive(Default)]
pub struct WorldGrid {
    size: UVec2,
    cells: Vec<Wall>,
}

impl WorldGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reallocate the cell array. All previous cell data is lost;
    /// every cell of the new grid is `Empty`.
    pub fn resize(&mut self, size: UVec2) {
        self.size = size;
        self.cells.clear();
        self.cells
            .resize_with((size.x * size.y) as usize, Wall::default);
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Signed bounds test for DDA traversal, which walks tile coordinates
    /// that may leave the map on any side.
    #[inline]
    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0
            && (tile.x as u32) < self.size.x
            && tile.y >= 0
            && (tile.y as u32) < self.size.y
    }

    /// Direct indexed access, caller-guaranteed in-bounds.
    #[inline]
    pub fn cell(&self, pos: UVec2) -> &Wall {
        &self.cells[(pos.y * self.size.x + pos.x) as usize]
    }

    #[inline]
    pub fn cell_mut(&mut self, pos: UVec2) -> &mut Wall {
        &mut self.cells[(pos.y * self.size.x + pos.x) as usize]
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
