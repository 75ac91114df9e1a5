//! Piece module - tetromino matrices, collision checks, and lock payloads
//!
//! Every piece lives in an N×N square matrix (N = 2, 3 or 4). Matrix row 0 is
//! the *top* of the square; the anchor is the grid position of the square's
//! bottom-left cell, so matrix cell `(r, c)` sits at
//! `(x = anchor.x + c, y = anchor.y + (N - 1 - r))`.
//!
//! Orientation is implicit in the matrix layout. Rotation is a fixed 90°
//! clockwise transform of the square with no wall kicks: if the rotated
//! matrix does not fit in place, the rotation fails and nothing changes.
//!
//! Cells at or above the grid's top row never collide, so pieces can spawn
//! and rotate partly above the ceiling. The ceiling is only enforced when the
//! grid locks the piece.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::tile::Tile;
use crate::types::{BoardDims, Direction, PieceKind, Point};

/// Largest piece matrix side (the I piece)
pub const MAX_PIECE_SIZE: usize = 4;

/// Occupied `(row, col)` cells of a spawn pattern
pub type SpawnPattern = [(usize, usize); 4];

type Matrix = [[Option<Tile>; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
type MatrixRow = ArrayVec<Option<Tile>, MAX_PIECE_SIZE>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PieceError {
    #[error("unknown tetromino type {0:?}")]
    UnknownShape(String),
}

/// Canonical spawn layout for a piece kind, inside its `matrix_size()` square
pub fn spawn_pattern(kind: PieceKind) -> &'static SpawnPattern {
    match kind {
        // Vertical bar in column 1.
        PieceKind::I => &[(0, 1), (1, 1), (2, 1), (3, 1)],
        PieceKind::O => &[(0, 0), (0, 1), (1, 0), (1, 1)],
        PieceKind::Z => &[(1, 0), (1, 1), (2, 1), (2, 2)],
        PieceKind::S => &[(1, 1), (1, 2), (2, 0), (2, 1)],
        // Stem points down.
        PieceKind::T => &[(1, 0), (1, 1), (1, 2), (2, 1)],
        PieceKind::L => &[(0, 2), (1, 0), (1, 1), (1, 2)],
        PieceKind::J => &[(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// A rectangle of optional tiles handed from a piece to the grid on lock.
///
/// Row 0 is the top of the rectangle. At most 4×4, stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileMatrix {
    rows: ArrayVec<MatrixRow, MAX_PIECE_SIZE>,
}

impl TileMatrix {
    /// Build from rows listed top to bottom.
    ///
    /// Returns `None` for ragged input or anything larger than 4×4.
    pub fn from_rows<I, R>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Option<Tile>>,
    {
        let mut out = ArrayVec::new();
        let mut width = None;
        for row in rows {
            let mut cells = MatrixRow::new();
            for cell in row {
                cells.try_push(cell).ok()?;
            }
            match width {
                None => width = Some(cells.len()),
                Some(w) if w != cells.len() => return None,
                Some(_) => {}
            }
            out.try_push(cells).ok()?;
        }
        Some(Self { rows: out })
    }

    /// A 1×1 matrix
    pub fn single(tile: Tile) -> Self {
        let mut row = MatrixRow::new();
        row.push(Some(tile));
        let mut rows = ArrayVec::new();
        rows.push(row);
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Number of occupied cells
    pub fn tile_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Consume the matrix, yielding `(row, col, tile)` for occupied cells in
    /// row-major order (top row first).
    pub fn into_cells(self) -> impl Iterator<Item = (usize, usize, Tile)> {
        self.rows.into_iter().enumerate().flat_map(|(r, row)| {
            row.into_iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.map(|tile| (r, c, tile)))
        })
    }
}

/// What a piece yields to the grid when it locks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockPayload {
    pub tiles: TileMatrix,
    /// Grid position of the rectangle's bottom-left cell
    pub anchor: Point,
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    kind: PieceKind,
    size: usize,
    tiles: Matrix,
    anchor: Point,
    dims: BoardDims,
}

impl Tetromino {
    /// Create a piece of the given kind with fresh random tiles.
    ///
    /// The square is centered horizontally (`floor((W - N) / 2)`) and its
    /// bottom row sits on the grid's top row.
    pub fn spawn(kind: PieceKind, dims: BoardDims, rng: &mut SimpleRng) -> Self {
        let size = kind.matrix_size();
        let mut tiles: Matrix = Default::default();
        for &(r, c) in spawn_pattern(kind) {
            tiles[r][c] = Some(Tile::random(rng));
        }

        let x = (dims.width() as i32 - size as i32).div_euclid(2);
        let anchor = Point::new(x, dims.height() as i32 - 1);

        Self {
            kind,
            size,
            tiles,
            anchor,
            dims,
        }
    }

    /// Spawn from a shape tag such as `"T"` or `"l"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_core::{PieceError, SimpleRng, Tetromino};
    /// use tetris_2048_core::types::{BoardDims, PieceKind};
    ///
    /// let dims = BoardDims::default();
    /// let mut rng = SimpleRng::new(1);
    ///
    /// let piece = Tetromino::from_tag("s", dims, &mut rng).unwrap();
    /// assert_eq!(piece.kind(), PieceKind::S);
    ///
    /// let err = Tetromino::from_tag("X", dims, &mut rng).unwrap_err();
    /// assert_eq!(err, PieceError::UnknownShape("X".to_string()));
    /// ```
    pub fn from_tag(tag: &str, dims: BoardDims, rng: &mut SimpleRng) -> Result<Self, PieceError> {
        let kind = PieceKind::from_str(tag)
            .ok_or_else(|| PieceError::UnknownShape(tag.to_string()))?;
        Ok(Self::spawn(kind, dims, rng))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Side length of the piece matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grid position of the matrix's bottom-left cell
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.tiles[row][col].as_ref()
    }

    /// Occupied matrix cells as `(row, col)`, row-major
    pub fn occupied_offsets(&self) -> ArrayVec<(usize, usize), 16> {
        let mut out = ArrayVec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                if self.tiles[r][c].is_some() {
                    out.push((r, c));
                }
            }
        }
        out
    }

    /// Grid position of matrix cell `(row, col)`
    pub fn cell_position(&self, row: usize, col: usize) -> Point {
        Point::new(
            self.anchor.x + col as i32,
            self.anchor.y + (self.size - 1 - row) as i32,
        )
    }

    /// Occupied cells with their grid positions (may lie above the ceiling)
    pub fn cells(&self) -> impl Iterator<Item = (Point, &Tile)> + '_ {
        (0..self.size).flat_map(move |r| {
            (0..self.size).filter_map(move |c| {
                self.tiles[r][c]
                    .as_ref()
                    .map(|tile| (self.cell_position(r, c), tile))
            })
        })
    }

    /// Check whether the piece could move in `direction` without mutating it.
    pub fn can_move(&self, direction: Direction, grid: &Grid) -> bool {
        let n = self.size;
        let (dx, dy) = direction.offset();
        let anchor = self.anchor.translated(dx, dy);
        let width = self.dims.width() as i32;
        let height = self.dims.height() as i32;

        for r in 0..n {
            for c in 0..n {
                let occupied = match direction {
                    // Clockwise: candidate[r][c] = current[n - 1 - c][r]
                    Direction::Rotate => self.tiles[n - 1 - c][r].is_some(),
                    _ => self.tiles[r][c].is_some(),
                };
                if !occupied {
                    continue;
                }

                let x = anchor.x + c as i32;
                let y = anchor.y + (n - 1 - r) as i32;
                if x < 0 || x >= width {
                    return false;
                }
                if y < 0 {
                    return false;
                }
                if y < height && grid.is_occupied(y, x) {
                    return false;
                }
            }
        }

        true
    }

    /// Move in `direction` if possible. Returns false and leaves the piece
    /// untouched otherwise.
    pub fn try_move(&mut self, direction: Direction, grid: &Grid) -> bool {
        if !self.can_move(direction, grid) {
            return false;
        }

        match direction {
            Direction::Rotate => self.rotate_cw(),
            _ => {
                let (dx, dy) = direction.offset();
                self.anchor = self.anchor.translated(dx, dy);
            }
        }
        true
    }

    fn rotate_cw(&mut self) {
        let n = self.size;
        let mut old = std::mem::take(&mut self.tiles);
        for r in 0..n {
            for c in 0..n {
                self.tiles[r][c] = old[n - 1 - c][r].take();
            }
        }
    }

    /// Crop to the tight bounding box of occupied cells and copy the tiles.
    ///
    /// The anchor is translated to the rectangle's bottom-left cell. Empty
    /// margins of the square are never part of the payload.
    pub fn bounded_tiles_for_lock(&self) -> LockPayload {
        let occupied = self.occupied_offsets();
        let bounds = occupied.iter().fold(None, |acc, &(r, c)| match acc {
            None => Some((r, r, c, c)),
            Some((min_r, max_r, min_c, max_c)) => Some((
                min_r.min(r),
                max_r.max(r),
                min_c.min(c),
                max_c.max(c),
            )),
        });

        let Some((min_r, max_r, min_c, max_c)) = bounds else {
            return LockPayload {
                tiles: TileMatrix::default(),
                anchor: self.anchor,
            };
        };

        let rows = (min_r..=max_r)
            .map(|r| {
                (min_c..=max_c)
                    .map(|c| self.tiles[r][c].clone())
                    .collect::<MatrixRow>()
            })
            .collect();

        LockPayload {
            tiles: TileMatrix { rows },
            anchor: self.anchor.translated(min_c as i32, (self.size - 1 - max_r) as i32),
        }
    }
}
