//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s and tracks held
//! keys, including on terminals that never report key releases.

pub mod handler;
pub mod map;

pub use tile_tetris_types as types;

pub use handler::{InputHandler, Intents};
pub use map::{command_intent, held_key, should_quit, HeldKey};
