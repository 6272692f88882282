//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the piece, the
//! field it lands on, scoring and the session controller that ties them to
//! player intents and elapsed time. It has **no dependency** on the terminal
//! or any other I/O:
//!
//! - **Deterministic**: the same seed and the same intent/time sequence
//!   produce the same session
//! - **Testable**: every rule is covered by unit tests
//! - **Portable**: runs headless as easily as behind a renderer
//!
//! # Module Structure
//!
//! - [`piece`]: four absolute cells, translate / fall / pivot rotation
//! - [`field`]: occupancy grid with collision, commit and row clearing
//! - [`game`]: session controller (timers, spawning, landing, pause, reset)
//! - [`scoring`]: points per landing and the score-derived level
//! - [`rng`]: seeded uniform kind generation behind the [`KindSource`] seam
//! - [`config`]: tunable delays and field size
//! - [`snapshot`]: render-facing copy of a session
//!
//! # Game Rules
//!
//! - Pieces spawn at the top with their layout shifted 4 columns right.
//! - Rotation turns every cell about cell 1; there are no wall kicks, a
//!   blocked rotation simply does not happen.
//! - A piece that cannot fall one more row is committed immediately (no lock
//!   delay), full rows are cleared and the next piece spawns.
//! - A landing scores `100 + 50 * n * (n + 1)` for `n` cleared rows.
//! - The level is `score / 10000`, capped at 9, and selects the fall delay.
//! - A spawned piece that overlaps the field ends the game.
//!
//! # Example
//!
//! ```
//! use tile_tetris_core::{FallOutcome, Game};
//! use tile_tetris_core::types::Intent;
//!
//! let mut game = Game::new(12345);
//!
//! game.apply_intent(Intent::MoveLeft(true));
//! game.update(16);
//! game.apply_intent(Intent::MoveLeft(false));
//!
//! // Drop the piece all the way down.
//! while game.fall_step() == FallOutcome::Fell {}
//! assert_eq!(game.score(), 100);
//! ```
//!
//! # Timing
//!
//! Call [`Game::update`] every frame with the elapsed milliseconds. Move,
//! rotate and fall each keep their own timer and fire at most once per call.

pub mod config;
pub mod field;
pub mod game;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tile_tetris_types as types;

pub use config::GameConfig;
pub use field::Field;
pub use game::{FallOutcome, Game, LandingEvent};
pub use piece::{Piece, PieceError, PIVOT_INDEX};
pub use rng::{CycleKinds, KindSource, SimpleRng, UniformKinds};
pub use scoring::{landing_points, level_for_score};
pub use snapshot::GameSnapshot;
