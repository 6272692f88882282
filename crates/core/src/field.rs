//! Field module - the occupancy grid pieces land on
//!
//! The field is `width x height` cells (10x20 by default), stored as one flat
//! row-major vector addressed by `y * width + x`.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! Each cell holds 0 (empty) or the identifier (1..=7) of the kind that filled
//! it. Reads outside the grid return [`BLOCKED`], so out-of-bounds geometry
//! always collides.

use crate::piece::Piece;
use crate::types::{BLOCKED, FIELD_HEIGHT, FIELD_WIDTH};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Field {
    /// Create an empty field of the given size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// `(width, height)`
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Occupancy at (x, y): 0 when empty, a kind id when filled, [`BLOCKED`]
    /// outside the grid.
    pub fn occupancy(&self, x: i32, y: i32) -> u8 {
        match self.index(x, y) {
            Some(idx) => self.cells[idx],
            None => BLOCKED,
        }
    }

    /// Raw write. Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// True if any tile of `piece` lands on a non-empty or out-of-bounds cell.
    pub fn intersects(&self, piece: &Piece) -> bool {
        piece
            .tiles()
            .iter()
            .any(|&(x, y)| self.occupancy(x, y) != 0)
    }

    /// Write the piece's kind id into its four cells.
    ///
    /// Does not check for overlap; callers test [`Field::intersects`] first.
    /// Tiles outside the grid are skipped and a kind-less piece writes nothing.
    pub fn commit(&mut self, piece: &Piece) {
        let Some(kind) = piece.kind() else {
            return;
        };
        for &(x, y) in piece.tiles() {
            self.set(x, y, kind.id());
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != 0)
    }

    fn row(&self, y: usize) -> &[u8] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Remove row `y`, shift every row above it down by one and empty the top row.
    fn collapse_row(&mut self, y: usize) {
        let width = self.width as usize;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(0);
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Rows are scanned top to bottom and each full row collapses as soon as it
    /// is found. The rows pulled down over it were already scanned and known
    /// not full, so a single pass catches every full row.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for y in 0..self.height as usize {
            if self.is_row_full(y) {
                self.collapse_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_field_index_calculation() {
        let field = Field::default();
        assert_eq!(field.index(0, 0), Some(0));
        assert_eq!(field.index(9, 0), Some(9));
        assert_eq!(field.index(0, 1), Some(10));
        assert_eq!(field.index(9, 19), Some(199));
        assert_eq!(field.index(-1, 0), None);
        assert_eq!(field.index(10, 0), None);
        assert_eq!(field.index(0, 20), None);
    }

    #[test]
    fn test_field_flat_array() {
        let mut field = Field::default();

        field.set(0, 0, PieceKind::I.id());
        field.set(5, 10, PieceKind::T.id());

        assert_eq!(field.occupancy(0, 0), 1);
        assert_eq!(field.occupancy(5, 10), 6);

        assert_eq!(field.cells[0], 1);
        assert_eq!(field.cells[10 * 10 + 5], 6);
    }

    #[test]
    fn test_custom_size() {
        let field = Field::new(4, 3);
        assert_eq!(field.size(), (4, 3));
        assert_eq!(field.cells().len(), 12);
        assert_eq!(field.occupancy(3, 2), 0);
        assert_eq!(field.occupancy(4, 2), BLOCKED);
        assert_eq!(field.rows().count(), 3);
    }

    #[test]
    fn test_collapse_row_shifts_rows_above() {
        let mut field = Field::new(3, 4);
        field.set(0, 0, 1);
        field.set(1, 1, 2);
        field.set(2, 2, 3);
        field.set(0, 3, 4);

        field.collapse_row(2);

        assert_eq!(field.rows().next().unwrap(), &[0, 0, 0]);
        assert_eq!(field.occupancy(0, 1), 1);
        assert_eq!(field.occupancy(1, 2), 2);
        // Row below the collapsed one is untouched.
        assert_eq!(field.occupancy(0, 3), 4);
        assert_eq!(field.occupancy(2, 2), 0);
    }

    #[test]
    fn test_adjacent_full_rows_clear_in_one_pass() {
        let mut field = Field::new(3, 5);
        for y in 2..4 {
            for x in 0..3 {
                field.set(x, y, 5);
            }
        }
        field.set(1, 1, 7);
        field.set(0, 4, 2);

        assert_eq!(field.clear_full_rows(), 2);
        assert_eq!(field.occupancy(1, 3), 7);
        assert_eq!(field.occupancy(0, 4), 2);
        assert_eq!(field.cells().iter().filter(|&&c| c != 0).count(), 2);
    }
}
