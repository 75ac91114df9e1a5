//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal gameplay: the game view paints a
//! `GameSnapshot` into a framebuffer of styled cells, and the renderer
//! flushes that framebuffer to the terminal with crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Color every tile from the core palette
//! - Only rewrite cells that changed between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_2048_core as core;
pub use tetris_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
