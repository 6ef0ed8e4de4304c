//! Conversion between tile addresses and grid cells
//!
//! At depth `d` the tiles of a quadtree form a `2^d × 2^d` grid. Each digit
//! of an address contributes one bit to the column and one to the row,
//! most significant first, so the address is a Z-order path to its cell.

use super::address::{MAX_DEPTH, Quadrant, TileAddress};
use crate::error::{Error, Result};

/// A tile's cell in the grid of its depth
///
/// Column 0 is the left edge and row 0 the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Depth of the grid (number of address digits)
    pub depth: usize,
    /// Column, counted from the left
    pub col: u64,
    /// Row, counted from the top
    pub row: u64,
}

impl GridPosition {
    /// Number of tiles along each side of the grid, or `None` at depth 64
    pub fn side(&self) -> Option<u64> {
        1u64.checked_shl(u32::try_from(self.depth).ok()?)
    }

    /// Move by a signed number of cells, wrapping at the grid edge
    pub fn offset(&self, dx: i64, dy: i64) -> GridPosition {
        let mask = self.mask();
        GridPosition {
            depth: self.depth,
            col: self.col.wrapping_add_signed(dx) & mask,
            row: self.row.wrapping_add_signed(dy) & mask,
        }
    }

    fn mask(&self) -> u64 {
        match self.side() {
            Some(side) => side - 1,
            None => u64::MAX,
        }
    }
}

impl TileAddress {
    /// The cell of this tile in the grid of its depth
    ///
    /// # Example
    ///
    /// ```
    /// use geoquadtree::TileAddress;
    ///
    /// let cell = TileAddress::parse("23")?.grid_position();
    /// assert_eq!((cell.col, cell.row), (3, 1));
    /// # Ok::<(), geoquadtree::Error>(())
    /// ```
    pub fn grid_position(&self) -> GridPosition {
        let (col, row) = self.quadrants().fold((0u64, 0u64), |(col, row), quadrant| {
            let (c, r) = quadrant.cell();
            ((col << 1) | u64::from(c), (row << 1) | u64::from(r))
        });
        GridPosition {
            depth: self.depth(),
            col,
            row,
        }
    }

    /// The address of a cell in the grid of `depth`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if `depth` exceeds [`MAX_DEPTH`] or
    /// the cell lies outside the grid.
    pub fn from_grid(depth: usize, col: u64, row: u64) -> Result<TileAddress> {
        if depth > MAX_DEPTH {
            return Err(Error::InvalidAddress(format!(
                "grid depth {} exceeds the maximum of {}",
                depth, MAX_DEPTH
            )));
        }
        let position = GridPosition { depth, col, row };
        let mask = position.mask();
        if col & !mask != 0 || row & !mask != 0 {
            return Err(Error::InvalidAddress(format!(
                "cell ({}, {}) is outside the grid at depth {}",
                col, row, depth
            )));
        }
        TileAddress::from_quadrants((0..depth).rev().map(|bit| {
            let c = ((col >> bit) & 1) as u8;
            let r = ((row >> bit) & 1) as u8;
            Quadrant::from_cell(c, r)
        }))
    }
}

impl From<TileAddress> for GridPosition {
    fn from(address: TileAddress) -> Self {
        address.grid_position()
    }
}

impl TryFrom<GridPosition> for TileAddress {
    type Error = Error;

    fn try_from(position: GridPosition) -> Result<Self> {
        TileAddress::from_grid(position.depth, position.col, position.row)
    }
}
