//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid simulation, session driver, terminal rendering).
//!
//! # Coordinates
//!
//! The playfield uses `(row, col)` indexing with **row 0 at the bottom**:
//!
//! - **Columns**: `0..width`, left to right
//! - **Rows**: `0..height`, bottom to top
//! - Cells with `row >= height` are "above the ceiling"; pieces may occupy them
//!   while falling, but locking a tile there ends the game.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_HEIGHT` | 20 | Rows in a standard session |
//! | `DEFAULT_GRID_WIDTH` | 12 | Columns in a standard session |
//! | `MIN_GRID_DIM` | 4 | Smallest accepted height/width |
//! | `WIN_VALUE` | 2048 | Merging into this value wins |
//! | `TICK_MS` | 16 | Driver frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tetris_2048_types::{BoardDims, Difficulty, Direction, PieceKind};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! assert_eq!(Direction::from_str("rotate"), Some(Direction::Rotate));
//! assert_eq!(Difficulty::Hard.fall_delay_ms(), 150);
//!
//! let dims = BoardDims::new(6, 4).unwrap();
//! assert_eq!((dims.height(), dims.width()), (6, 4));
//! assert!(BoardDims::new(2, 4).is_none());
//! ```

/// Default grid height in rows (20)
pub const DEFAULT_GRID_HEIGHT: usize = 20;

/// Default grid width in columns (12)
pub const DEFAULT_GRID_WIDTH: usize = 12;

/// Smallest accepted grid dimension; every tetromino square must fit horizontally.
pub const MIN_GRID_DIM: usize = 4;

/// Tile value that wins the game when produced by a merge
pub const WIN_VALUE: u32 = 2048;

/// Fixed driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    Z,
    S,
    T,
    L,
    J,
}

impl PieceKind {
    /// Every kind, in the order used for uniform random picks.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Convert to uppercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }

    /// Side length of the square matrix the piece lives in
    pub fn matrix_size(&self) -> usize {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }
}

/// A single piece command.
///
/// Translation moves the anchor by one cell; `Rotate` turns the piece matrix
/// 90° clockwise in place (no wall kicks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Rotate,
}

impl Direction {
    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "down" => Some(Direction::Down),
            "rotate" => Some(Direction::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Rotate => "rotate",
        }
    }

    /// Anchor offset `(dx, dy)` for translations; `(0, 0)` for rotation
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Rotate => (0, 0),
        }
    }
}

/// Game actions issued by the turn driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece as far as it goes; it locks on the next gravity step
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Restart the session with the same settings
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// The piece direction this action moves in, if it is a movement
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::SoftDrop => Some(Direction::Down),
            GameAction::Rotate => Some(Direction::Rotate),
            _ => None,
        }
    }
}

/// Fall speed presets
///
/// | Difficulty | Fall delay |
/// |------------|------------|
/// | Easy | 750ms |
/// | Normal | 400ms |
/// | Hard | 150ms |
/// | Lunatic | 50ms |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Lunatic,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Lunatic,
    ];

    /// Milliseconds between gravity steps
    pub fn fall_delay_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 750,
            Difficulty::Normal => 400,
            Difficulty::Hard => 150,
            Difficulty::Lunatic => 50,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "lunatic" => Some(Difficulty::Lunatic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Lunatic => "lunatic",
        }
    }
}

/// Immutable playfield dimensions shared by the grid and every piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardDims {
    height: usize,
    width: usize,
}

impl BoardDims {
    /// Returns `None` if either dimension is below [`MIN_GRID_DIM`].
    pub fn new(height: usize, width: usize) -> Option<Self> {
        if height < MIN_GRID_DIM || width < MIN_GRID_DIM {
            return None;
        }
        Some(Self { height, width })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells in the playfield
    pub fn area(&self) -> usize {
        self.height * self.width
    }
}

impl Default for BoardDims {
    fn default() -> Self {
        Self {
            height: DEFAULT_GRID_HEIGHT,
            width: DEFAULT_GRID_WIDTH,
        }
    }
}

/// A 2D grid coordinate (`x` = column, `y` = row, row 0 at the bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Summary of one `Grid::lock` call.
///
/// Engine-internal; the session driver forwards it to the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// The lock hit the ceiling and ended the game.
    pub overflowed: bool,
    pub merges: u32,
    pub rows_cleared: u32,
    /// Single-row drops performed while settling.
    pub settle_drops: u32,
    pub score_gained: u64,
    /// Merge/settle/clear rounds the pipeline needed.
    pub rounds: u32,
    /// Win latch state after the lock.
    pub win: bool,
}
