//! Shared types and constants - plain data used by every crate in the workspace
//!
//! Nothing in here depends on I/O or on any other crate, so the same
//! definitions are usable from the game core, the terminal adapter, and tests.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn column offset**: +4 applied to each layout column
//!
//! # Timing Constants
//!
//! All values are milliseconds. A timer fires once its accumulated time is
//! strictly greater than the threshold.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Main loop cadence (~60 FPS) |
//! | `MOVE_DELAY_MS` | 100 | Horizontal repeat while held |
//! | `ROTATE_DELAY_MS` | 400 | Rotation repeat while held |
//! | `ACCELERATED_FALL_MS` | 25 | Fall delay while soft drop is held |
//!
//! # Fall Delay by Level
//!
//! | Level | Delay |
//! |-------|-------|
//! | 0 | 400ms |
//! | 1 | 350ms |
//! | 2 | 300ms |
//! | 3 | 250ms |
//! | 4 | 200ms |
//! | 5 | 150ms |
//! | 6 | 100ms |
//! | 7 | 75ms |
//! | 8 | 50ms |
//! | 9 | 35ms |
//!
//! # Examples
//!
//! ```
//! use tile_tetris_types::{Intent, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let kind = PieceKind::from_id(4).unwrap();
//! assert_eq!(kind, PieceKind::O);
//! assert_eq!(kind.id(), 4);
//!
//! let intent = Intent::MoveLeft(true);
//! assert_ne!(intent, Intent::MoveLeft(false));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: u16 = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: u16 = 20;

/// Occupancy value returned for coordinates outside the field.
///
/// Never stored in the grid; any non-zero occupancy blocks a piece.
pub const BLOCKED: u8 = 8;

/// Column offset added to every layout column when a piece spawns.
pub const SPAWN_COLUMN_OFFSET: i32 = 4;

/// Main loop cadence in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between horizontal moves while a direction is held.
pub const MOVE_DELAY_MS: u32 = 100;

/// Delay between rotations while rotate is held.
pub const ROTATE_DELAY_MS: u32 = 400;

/// Fall delay while soft drop is held.
pub const ACCELERATED_FALL_MS: u32 = 25;

/// Number of difficulty levels (0..=9).
pub const LEVEL_COUNT: usize = 10;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = (LEVEL_COUNT - 1) as u32;

/// Fall delay per level, strictly decreasing.
pub const FALL_DELAYS_MS: [u32; LEVEL_COUNT] = [400, 350, 300, 250, 200, 150, 100, 75, 50, 35];

/// Score needed per level step (`level = score / LEVEL_DIVISOR`, capped at 9).
pub const LEVEL_DIVISOR: u32 = 10_000;

/// Flat points awarded for every landed piece.
pub const LANDING_POINTS: u32 = 100;

/// Line bonus factor: `LINE_BONUS * n * (n + 1)` for `n` cleared rows.
pub const LINE_BONUS: u32 = 50;

/// Window width of the sprite layout in pixels.
pub const WINDOW_WIDTH_PX: u32 = 800;

/// Window height of the sprite layout in pixels.
pub const WINDOW_HEIGHT_PX: u32 = 640;

/// Edge length of one tile in pixels.
pub const CELL_SIZE_PX: u32 = 32;

/// Layout grid width in tiles (800 / 32).
pub const LAYOUT_COLUMNS: u16 = (WINDOW_WIDTH_PX / CELL_SIZE_PX) as u16;

/// Layout grid height in tiles (640 / 32).
pub const LAYOUT_ROWS: u16 = (WINDOW_HEIGHT_PX / CELL_SIZE_PX) as u16;

/// Largest number the six-digit counters can show.
pub const MAX_DISPLAY_NUMBER: u32 = 999_999;

/// The seven tetromino kinds
///
/// Identifiers run 1..=7 in declaration order; 0 is reserved for an empty
/// cell and [`BLOCKED`] for out-of-bounds.
/// - **I**: Cyan, straight bar
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Magenta
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in identifier order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Occupancy identifier written into the field (1..=7).
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`].
    ///
    /// ```
    /// use tile_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Canonical layout as `(column, row)` pairs, before the spawn offset.
    pub fn layout(self) -> [(i32, i32); 4] {
        match self {
            PieceKind::I => [(1, 0), (1, 1), (1, 2), (1, 3)],
            PieceKind::J => [(1, 0), (1, 1), (0, 2), (1, 2)],
            PieceKind::L => [(0, 0), (0, 1), (0, 2), (1, 2)],
            PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            PieceKind::S => [(0, 0), (0, 1), (1, 1), (1, 2)],
            PieceKind::T => [(0, 0), (0, 1), (1, 1), (0, 2)],
            PieceKind::Z => [(1, 0), (0, 1), (1, 1), (0, 2)],
        }
    }
}

/// Player intents produced by the input adapter
///
/// Held-state variants carry `true` on press and `false` on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft(bool),
    MoveRight(bool),
    Rotate(bool),
    /// Shortens the fall delay while held
    SoftDrop(bool),
    /// Running <-> Paused
    TogglePause,
    /// Reinitialize the whole session
    Reset,
}

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Running,
    Paused,
    GameOver,
}

/// A field coordinate `(x, y)`; may be out of bounds while testing candidates.
pub type Coord = (i32, i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fall_delays_speed_up_with_level() {
        for pair in FALL_DELAYS_MS.windows(2) {
            assert!(pair[0] > pair[1], "{:?} is not decreasing", pair);
        }
        assert!(ACCELERATED_FALL_MS < FALL_DELAYS_MS[LEVEL_COUNT - 1]);
    }

    #[test]
    fn layout_grid_matches_window() {
        assert_eq!(LAYOUT_COLUMNS, 25);
        assert_eq!(LAYOUT_ROWS, 20);
        assert_eq!(MAX_LEVEL, 9);
    }
}
