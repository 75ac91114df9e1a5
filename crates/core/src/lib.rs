//! Core game logic module - pure, deterministic, and testable
//!
//! A falling-block game where every block is a numbered 2048 tile. Pieces
//! fall and lock like tetrominoes; once locked, equal tiles stacked
//! vertically merge, unsupported tiles settle, and full rows clear for the
//! sum of their values.
//!
//! This crate has **zero dependencies** on UI or I/O:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Every pipeline stage is reachable on its own
//! - **Portable**: Can run in any environment (terminal, headless, benches)
//!
//! # Module Structure
//!
//! - [`grid`]: Locked-tile board with the merge / settle / clear pipeline
//! - [`piece`]: Tetromino matrices, clockwise rotation, collision, lock payloads
//! - [`tile`]: Numbered tiles and their color palette
//! - [`rng`]: Seeded LCG for tile values and piece kinds
//! - [`game_state`]: Session driver (active piece, preview, gravity, pause)
//! - [`snapshot`]: Render-ready copy of a session
//!
//! # Example
//!
//! ```
//! use tetris_2048_core::{GameState, GameStatus};
//! use tetris_2048_core::types::{BoardDims, Difficulty, GameAction};
//!
//! let mut game = GameState::new(BoardDims::default(), Difficulty::Normal, 12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop only moves; the next gravity step locks the piece.
//! assert!(game.gravity_step());
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. A gravity step runs once the difficulty's fall delay
//! has accumulated.

pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use tetris_2048_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, GameStatus, LockedPiece};
pub use grid::Grid;
pub use piece::{spawn_pattern, LockPayload, PieceError, Tetromino, TileMatrix};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
pub use tile::{style_for, Tile, TileStyle};
