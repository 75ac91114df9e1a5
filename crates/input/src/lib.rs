//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] for the
//! session driver, plus the few keys the start menu understands. Key repeat
//! is left to the terminal.

pub mod map;

pub use tetris_2048_types as types;

pub use map::{handle_key_event, is_menu_key, is_start_key, menu_difficulty, should_quit};
