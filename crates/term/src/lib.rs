//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: a [`GameView`] paints a core
//! snapshot into a [`FrameBuffer`] of styled cells, and the
//! [`TerminalRenderer`] flushes that buffer to the terminal, diffing against
//! the previous frame. No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_tetris_core as core;
pub use tile_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{kind_color, AnchorY, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
