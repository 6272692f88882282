//! Piece module - the falling tetromino as four absolute field coordinates
//!
//! A piece carries no rotation state: `rotate` turns the four cells a quarter
//! turn about cell 1, so O and I pieces drift when rotated. Collision is the
//! field's business; every transform here is pure arithmetic and always
//! succeeds, even when it pushes cells out of bounds.

use std::fmt;

use crate::types::{Coord, PieceKind, SPAWN_COLUMN_OFFSET};

/// Index of the cell used as the rotation pivot.
pub const PIVOT_INDEX: usize = 1;

/// Contract violations when driving a [`Piece`] with untyped input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceError {
    /// Kind identifier outside 1..=7.
    InvalidKind(u8),
    /// Tile index outside 0..4.
    IndexOutOfRange(usize),
}

impl fmt::Display for PieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceError::InvalidKind(id) => write!(f, "invalid piece kind id {id} (expected 1..=7)"),
            PieceError::IndexOutOfRange(index) => {
                write!(f, "tile index {index} out of range (expected 0..4)")
            }
        }
    }
}

impl std::error::Error for PieceError {}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: Option<PieceKind>,
    cells: [Coord; 4],
}

impl Piece {
    /// An uninitialized piece with no kind.
    pub fn new() -> Self {
        Self {
            kind: None,
            cells: [(0, 0); 4],
        }
    }

    /// A piece of `kind` at its spawn position.
    pub fn spawn(kind: PieceKind) -> Self {
        let mut piece = Self::new();
        piece.reset_to(kind);
        piece
    }

    /// Initialize from a raw kind identifier (1..=7).
    ///
    /// ```
    /// use tile_tetris_core::{Piece, PieceError};
    ///
    /// let mut piece = Piece::new();
    /// assert_eq!(piece.initialize(0), Err(PieceError::InvalidKind(0)));
    /// assert!(piece.initialize(4).is_ok());
    /// assert_eq!(piece.tiles(), &[(4, 0), (5, 0), (4, 1), (5, 1)]);
    /// ```
    pub fn initialize(&mut self, id: u8) -> Result<(), PieceError> {
        let kind = PieceKind::from_id(id).ok_or(PieceError::InvalidKind(id))?;
        self.reset_to(kind);
        Ok(())
    }

    fn reset_to(&mut self, kind: PieceKind) {
        self.kind = Some(kind);
        for (cell, (col, row)) in self.cells.iter_mut().zip(kind.layout()) {
            *cell = (col + SPAWN_COLUMN_OFFSET, row);
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    /// Coordinate of one cell.
    pub fn tile(&self, index: usize) -> Result<Coord, PieceError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(PieceError::IndexOutOfRange(index))
    }

    pub fn tiles(&self) -> &[Coord; 4] {
        &self.cells
    }

    /// Shift all cells horizontally.
    pub fn translate(&mut self, dx: i32) {
        for cell in &mut self.cells {
            cell.0 += dx;
        }
    }

    /// Shift all cells one row down.
    pub fn fall(&mut self) {
        for cell in &mut self.cells {
            cell.1 += 1;
        }
    }

    /// Quarter turn about cell [`PIVOT_INDEX`].
    pub fn rotate(&mut self) {
        let (cx, cy) = self.cells[PIVOT_INDEX];
        for cell in &mut self.cells {
            let (x, y) = *cell;
            *cell = (cx - (y - cy), cy + (x - cx));
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::new()
    }
}
