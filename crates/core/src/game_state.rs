//! Game state module - the turn driver around the grid
//!
//! Ties together the grid, the active piece, the next-piece preview, and the
//! RNG. Each gravity step moves the active piece down; when it cannot move,
//! its cropped tiles lock into the grid and the preview piece takes over.
//! A session ends when a lock overflows the ceiling or a merge reaches 2048.

use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::{Grid, SimpleRng, Tetromino};

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    NotStarted,
    Playing,
    Paused,
    Won,
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "notStarted",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }

    /// Won or lost
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// A lock that happened during the session (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedPiece {
    pub kind: PieceKind,
    pub event: LockEvent,
    /// Grid score after the lock
    pub score: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    difficulty: Difficulty,
    seed: u32,
    rng: SimpleRng,
    grid: Grid,
    active: Option<Tetromino>,
    next: Tetromino,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    pieces_locked: u32,
    fall_timer_ms: u32,
    last_lock: Option<LockedPiece>,
    paused: bool,
    started: bool,
}

impl GameState {
    /// Create a new session with the given RNG seed
    pub fn new(dims: BoardDims, difficulty: Difficulty, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Tetromino::spawn(rng.piece_kind(), dims, &mut rng);

        Self {
            difficulty,
            seed,
            rng,
            grid: Grid::new(dims),
            active: None,
            next,
            episode_id: 0,
            pieces_locked: 0,
            fall_timer_ms: 0,
            last_lock: None,
            paused: false,
            started: false,
        }
    }

    /// Start the session and bring in the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn status(&self) -> GameStatus {
        if !self.started {
            GameStatus::NotStarted
        } else if self.grid.win() {
            GameStatus::Won
        } else if self.grid.game_over() {
            GameStatus::Lost
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Playing
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn dims(&self) -> BoardDims {
        self.grid.dims()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn score(&self) -> u64 {
        self.grid.score()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    /// The preview piece that spawns after the active one locks
    pub fn next_piece(&self) -> &Tetromino {
        &self.next
    }

    /// Promote the preview piece and build a new preview
    pub fn spawn_piece(&mut self) {
        let upcoming = Tetromino::spawn(self.rng.piece_kind(), self.dims(), &mut self.rng);
        let current = std::mem::replace(&mut self.next, upcoming);
        self.active = Some(current);
        self.fall_timer_ms = 0;
    }

    /// Apply a driver command. Returns true if it changed anything.
    ///
    /// Movement is ignored while paused, before start, and after the session
    /// has finished.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if !self.started || self.status().is_finished() {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if self.status() != GameStatus::Playing => false,
            GameAction::HardDrop => self.hard_drop() > 0,
            _ => match action.direction() {
                Some(direction) => self.try_move(direction),
                None => false,
            },
        }
    }

    /// Move the active piece through the grid's collision rules
    pub fn try_move(&mut self, direction: Direction) -> bool {
        match self.active.as_mut() {
            Some(active) => active.try_move(direction, &self.grid),
            None => false,
        }
    }

    /// Drop the active piece as far as it goes. Returns rows dropped.
    ///
    /// The piece is not locked here; the next gravity step finds it unable to
    /// move and locks it.
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.try_move(Direction::Down) {
            rows += 1;
        }
        rows
    }

    /// Advance timers; runs a gravity step when the fall delay has elapsed.
    ///
    /// Returns true if a piece locked during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status() != GameStatus::Playing {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.difficulty.fall_delay_ms() {
            return false;
        }
        self.fall_timer_ms = 0;
        self.gravity_step()
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// Returns true if the piece locked.
    pub fn gravity_step(&mut self) -> bool {
        if self.try_move(Direction::Down) {
            return false;
        }
        self.lock_active()
    }

    /// Lock the active piece into the grid and spawn the next one.
    ///
    /// Returns false if there was no active piece.
    pub fn lock_active(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        let payload = active.bounded_tiles_for_lock();
        self.grid.lock(payload.tiles, payload.anchor);
        self.pieces_locked += 1;

        if let Some(event) = self.grid.take_last_event() {
            self.last_lock = Some(LockedPiece {
                kind: active.kind(),
                event,
                score: self.grid.score(),
            });
        }

        if !self.status().is_finished() {
            self.spawn_piece();
        }
        true
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockedPiece> {
        self.last_lock.take()
    }

    /// Change the fall speed before the session starts.
    ///
    /// Returns false once the session is running.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.started {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Throw the session away and wait for `start` again.
    ///
    /// The new seed is drawn from the current RNG so episodes differ.
    pub fn reset(&mut self) {
        let seed = self.rng.next_u32();
        let episode_id = self.episode_id.wrapping_add(1);
        *self = GameState::new(self.dims(), self.difficulty, seed);
        self.episode_id = episode_id;
    }

    /// Start over with the same dimensions and difficulty.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let dims = self.dims();
        out.height = dims.height();
        out.width = dims.width();

        out.board.clear();
        out.board.resize(dims.area(), None);
        for (row, col, tile) in self.grid.occupied() {
            out.board[row * out.width + col] = Some(tile.value());
        }

        out.active.clear();
        if let Some(active) = &self.active {
            out.active.extend(active.cells().map(|(pos, tile)| (pos, tile.value())));
        }

        let next_anchor = self.next.anchor();
        out.next_kind = self.next.kind();
        out.next.clear();
        out.next.extend(self.next.cells().map(|(pos, tile)| {
            (
                Point::new(pos.x - next_anchor.x, pos.y - next_anchor.y),
                tile.value(),
            )
        }));

        out.score = self.grid.score();
        out.status = self.status();
        out.difficulty = self.difficulty;
        out.episode_id = self.episode_id;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
