use crate::game_state::GameStatus;
use crate::types::{Difficulty, PieceKind, Point};

/// Render-ready copy of a session.
///
/// `board` is row-major with row 0 at the bottom, holding tile values.
/// `active` holds absolute grid positions (some may sit above the ceiling);
/// `next` holds positions relative to the preview piece's bottom-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub height: usize,
    pub width: usize,
    pub board: Vec<Option<u32>>,
    pub active: Vec<(Point, u32)>,
    pub next_kind: PieceKind,
    pub next: Vec<(Point, u32)>,
    pub score: u64,
    pub status: GameStatus,
    pub difficulty: Difficulty,
    pub episode_id: u32,
    pub pieces_locked: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            height: 0,
            width: 0,
            board: Vec::new(),
            active: Vec::new(),
            next_kind: PieceKind::I,
            next: Vec::new(),
            score: 0,
            status: GameStatus::NotStarted,
            difficulty: Difficulty::default(),
            episode_id: 0,
            pieces_locked: 0,
        }
    }
}

impl GameSnapshot {
    /// Locked tile value at `(row, col)`; `None` when empty or out of range
    pub fn value_at(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.board.get(row * self.width + col).copied().flatten()
    }

    /// Active piece tile value at `(row, col)`, if the piece covers it
    pub fn active_at(&self, row: usize, col: usize) -> Option<u32> {
        self.active
            .iter()
            .find(|(p, _)| p.y == row as i32 && p.x == col as i32)
            .map(|&(_, v)| v)
    }

    /// What a viewer sees at `(row, col)`: the active piece drawn over the board
    pub fn visible_at(&self, row: usize, col: usize) -> Option<u32> {
        self.active_at(row, col).or_else(|| self.value_at(row, col))
    }
}
