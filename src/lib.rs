//! Tile Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `tile_tetris::{core,input,term,types}`
//! and adds the JSON [`settings`] layer used by the binary.

pub mod settings;

pub use tile_tetris_core as core;
pub use tile_tetris_input as input;
pub use tile_tetris_term as term;
pub use tile_tetris_types as types;

pub use settings::{Settings, SettingsStore};
