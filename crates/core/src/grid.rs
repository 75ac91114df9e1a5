//! Grid module - the locked-tile board and its resolution pipeline
//!
//! The grid is `height × width` cells of `Option<Tile>`, stored flat in
//! row-major order (`row * width + col`) with **row 0 at the bottom**.
//!
//! Locking a piece writes its tiles and then resolves the board:
//!
//! 1. **Cascading merge** - equal vertical neighbors combine into the lower
//!    tile, repeated (with settling in between) until nothing merges.
//! 2. **Settling** - tiles not 4-connected to the bottom row fall one row per
//!    pass until everything is supported.
//! 3. **Row clearing** - full rows score their sum and are removed.
//! 4. **Settling** again.
//!
//! The round repeats while it moves or clears tiles, so `lock` always returns
//! a board with no mergeable pairs, no floating tiles, and no full rows.

use crate::piece::TileMatrix;
use crate::tile::Tile;
use crate::types::{BoardDims, LockEvent, Point, WIN_VALUE};

/// The locked-tile board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: BoardDims,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Option<Tile>>,
    score: u64,
    win: bool,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(dims: BoardDims) -> Self {
        Self {
            dims,
            cells: vec![None; dims.area()],
            score: 0,
            win: false,
            game_over: false,
            last_event: None,
        }
    }

    pub fn dims(&self) -> BoardDims {
        self.dims
    }

    pub fn height(&self) -> usize {
        self.dims.height()
    }

    pub fn width(&self) -> usize {
        self.dims.width()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Latched once any merge produces [`WIN_VALUE`]
    pub fn win(&self) -> bool {
        self.win
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_inside(row, col) {
            return None;
        }
        Some(row as usize * self.width() + col as usize)
    }

    #[inline(always)]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width() + col
    }

    /// Check if (row, col) lies inside the playfield
    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width()
    }

    /// Check if (row, col) holds a tile. Out of bounds is never occupied.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some()
    }

    /// Tile at (row, col), `None` if empty or out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<&Tile> {
        self.index(row, col).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Option<Tile>) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Occupied cells as `(row, col, tile)`, bottom row first
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Tile)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| {
                cell.as_ref().map(|tile| (idx / width, idx % width, tile))
            })
    }

    /// Number of occupied cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height() {
            return false;
        }
        let start = row * self.width();
        self.cells[start..start + self.width()]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Take and clear the summary of the most recent `lock`.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Lock a tile rectangle into the grid and resolve the board.
    ///
    /// Matrix row 0 is the top of the rectangle; `anchor` is the grid position
    /// of its bottom-left cell. Returns true when a tile lands at or above the
    /// ceiling: the game is over and this call stops placing immediately,
    /// leaving the tiles it already wrote in place.
    ///
    /// Every tile below the ceiling must land on an empty in-bounds cell.
    /// Payloads from [`Tetromino::bounded_tiles_for_lock`] after a failed
    /// downward move always do; debug builds assert it for other callers.
    ///
    /// [`Tetromino::bounded_tiles_for_lock`]: crate::Tetromino::bounded_tiles_for_lock
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_core::{Grid, Tile, TileMatrix};
    /// use tetris_2048_core::types::{BoardDims, Point};
    ///
    /// let mut grid = Grid::new(BoardDims::new(6, 4).unwrap());
    /// let two = || TileMatrix::single(Tile::new(2).unwrap());
    ///
    /// assert!(!grid.lock(two(), Point::new(0, 0)));
    /// assert!(!grid.lock(two(), Point::new(0, 1)));
    ///
    /// assert_eq!(grid.get(0, 0).map(|t| t.value()), Some(4));
    /// assert!(!grid.is_occupied(1, 0));
    /// assert_eq!(grid.score(), 4);
    /// ```
    pub fn lock(&mut self, tiles: TileMatrix, anchor: Point) -> bool {
        let rows = tiles.height();
        let score_before = self.score;
        let mut event = LockEvent::default();

        for (r, c, tile) in tiles.into_cells() {
            let x = anchor.x + c as i32;
            let y = anchor.y + (rows - 1 - r) as i32;
            if y >= self.height() as i32 {
                self.game_over = true;
                event.overflowed = true;
                event.win = self.win;
                self.last_event = Some(event);
                return true;
            }
            debug_assert!(!self.is_occupied(y, x), "lock onto occupied cell ({y}, {x})");
            let placed = self.set(y, x, Some(tile));
            debug_assert!(placed, "lock outside the grid at ({y}, {x})");
        }

        self.resolve(&mut event);

        event.score_gained = self.score - score_before;
        event.win = self.win;
        self.last_event = Some(event);
        self.game_over
    }

    /// Run merge → settle → clear → settle rounds until a round neither
    /// drops nor clears anything.
    fn resolve(&mut self, event: &mut LockEvent) {
        loop {
            event.rounds += 1;
            self.cascade_merge(event);
            let drops = self.settle();
            let cleared = self.clear_full_rows();
            event.settle_drops += drops + self.settle();
            event.rows_cleared += cleared;
            if drops == 0 && cleared == 0 {
                break;
            }
        }
    }

    /// Merge equal vertical neighbors until a full scan merges nothing.
    ///
    /// The lower tile doubles and the upper cell empties. After a merge the
    /// same cell is compared again before the scan moves up.
    fn cascade_merge(&mut self, event: &mut LockEvent) {
        let height = self.height();
        let width = self.width();

        loop {
            let mut merged = false;
            for col in 0..width {
                let mut row = 0;
                while row + 1 < height {
                    let lower = self.idx(row, col);
                    let upper = self.idx(row + 1, col);
                    let equal = match (&self.cells[lower], &self.cells[upper]) {
                        (Some(a), Some(b)) => a.value() == b.value(),
                        _ => false,
                    };

                    if !equal {
                        row += 1;
                        continue;
                    }

                    self.cells[upper] = None;
                    if let Some(tile) = self.cells[lower].as_mut() {
                        tile.double();
                        self.score += u64::from(tile.value());
                        if tile.value() == WIN_VALUE {
                            self.win = true;
                        }
                    }
                    merged = true;
                    event.merges += 1;
                }
            }

            if !merged {
                break;
            }
            // Merges open gaps; tiles above may fall into new pairs.
            event.settle_drops += self.settle();
        }
    }

    /// Drop unsupported tiles one row per pass until a pass moves nothing.
    ///
    /// Returns the number of single-row drops performed.
    fn settle(&mut self) -> u32 {
        let mut drops = 0;
        loop {
            let supported = self.connected_to_bottom();
            let mut moved = false;

            for row in 1..self.height() {
                for col in 0..self.width() {
                    let idx = self.idx(row, col);
                    if self.cells[idx].is_none() || supported[idx] {
                        continue;
                    }
                    let below = self.idx(row - 1, col);
                    if self.cells[below].is_none() {
                        self.cells[below] = self.cells[idx].take();
                        moved = true;
                        drops += 1;
                    }
                }
            }

            if !moved {
                return drops;
            }
        }
    }

    /// Flood fill (4-directional) through occupied cells from the bottom row.
    ///
    /// `result[idx]` is true for every cell resting on the floor directly or
    /// through a chain of occupied neighbors.
    pub fn connected_to_bottom(&self) -> Vec<bool> {
        let height = self.height();
        let width = self.width();
        let mut visited = vec![false; self.cells.len()];
        let mut stack: Vec<(usize, usize)> = (0..width)
            .filter(|&col| self.cells[col].is_some())
            .map(|col| (0, col))
            .collect();

        while let Some((row, col)) = stack.pop() {
            let idx = self.idx(row, col);
            if visited[idx] {
                continue;
            }
            visited[idx] = true;

            let neighbors = [
                (row + 1 < height).then(|| (row + 1, col)),
                row.checked_sub(1).map(|r| (r, col)),
                (col + 1 < width).then(|| (row, col + 1)),
                col.checked_sub(1).map(|c| (row, c)),
            ];
            for (nr, nc) in neighbors.into_iter().flatten() {
                let nidx = self.idx(nr, nc);
                if self.cells[nidx].is_some() && !visited[nidx] {
                    stack.push((nr, nc));
                }
            }
        }

        visited
    }

    /// Remove every full row, crediting the sum of its values.
    ///
    /// Surviving rows compact downward in order and vacated top rows are
    /// blanked. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.width();
        let mut write_row = 0;
        let mut cleared = 0;

        for read_row in 0..self.height() {
            if self.is_row_full(read_row) {
                let start = read_row * width;
                let row_sum: u64 = self.cells[start..start + width]
                    .iter()
                    .flatten()
                    .map(|tile| u64::from(tile.value()))
                    .sum();
                self.score += row_sum;
                cleared += 1;
                continue;
            }

            if write_row != read_row {
                for col in 0..width {
                    let src = self.idx(read_row, col);
                    let dst = self.idx(write_row, col);
                    self.cells[dst] = self.cells[src].take();
                }
            }
            write_row += 1;
        }

        // Blank the rows freed at the top.
        for cell in &mut self.cells[write_row * width..] {
            *cell = None;
        }

        cleared
    }

    /// Delete every tile not connected to the bottom row, crediting its value.
    ///
    /// Not part of `lock`: settling already guarantees no floaters survive a
    /// lock. Returns the number of tiles removed.
    pub fn purge_floating(&mut self) -> usize {
        let supported = self.connected_to_bottom();
        let mut removed = 0;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if supported[idx] {
                continue;
            }
            if let Some(tile) = cell.take() {
                self.score += u64::from(tile.value());
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(h: usize, w: usize) -> Grid {
        Grid::new(BoardDims::new(h, w).unwrap())
    }

    fn tile(value: u32) -> Option<Tile> {
        Tile::new(value)
    }

    fn value_at(grid: &Grid, row: i32, col: i32) -> Option<u32> {
        grid.get(row, col).map(|t| t.value())
    }

    #[test]
    fn test_index_and_bounds() {
        let g = grid(6, 4);
        assert_eq!(g.index(0, 0), Some(0));
        assert_eq!(g.index(0, 3), Some(3));
        assert_eq!(g.index(1, 0), Some(4));
        assert_eq!(g.index(5, 3), Some(23));
        assert_eq!(g.index(-1, 0), None);
        assert_eq!(g.index(6, 0), None);
        assert_eq!(g.index(0, 4), None);
        assert!(!g.is_occupied(-1, -1));
    }

    #[test]
    fn test_merge_settle_merge_chain_within_one_cascade() {
        let mut g = grid(6, 4);
        g.set(0, 0, tile(2));
        g.set(1, 0, tile(2));
        g.set(2, 0, tile(4));
        let mut event = LockEvent::default();

        g.cascade_merge(&mut event);

        // 2+2 → 4, the 4 above falls into the gap, 4+4 → 8.
        assert_eq!(value_at(&g, 0, 0), Some(8));
        assert_eq!(g.tile_count(), 1);
        assert_eq!(g.score(), 4 + 8);
        assert_eq!(event.merges, 2);
    }

    #[test]
    fn test_settle_drops_connected_mass_together() {
        let mut g = grid(6, 4);
        // Floating horizontal pair at row 3.
        g.set(3, 1, tile(2));
        g.set(3, 2, tile(8));

        let drops = g.settle();

        assert_eq!(value_at(&g, 0, 1), Some(2));
        assert_eq!(value_at(&g, 0, 2), Some(8));
        assert_eq!(drops, 6);
    }

    #[test]
    fn test_settle_keeps_tiles_hanging_from_supported_neighbors() {
        let mut g = grid(6, 4);
        g.set(0, 0, tile(2));
        g.set(1, 0, tile(4));
        g.set(1, 1, tile(8)); // overhang, supported through (1, 0)

        assert_eq!(g.settle(), 0);
        assert_eq!(value_at(&g, 1, 1), Some(8));
    }

    #[test]
    fn test_clear_full_rows_scores_and_compacts() {
        let mut g = grid(6, 4);
        for col in 0..4 {
            g.set(0, col, tile(2));
            g.set(2, col, tile(4));
        }
        g.set(1, 0, tile(16));
        g.set(3, 3, tile(32));

        let cleared = g.clear_full_rows();

        assert_eq!(cleared, 2);
        assert_eq!(g.score(), 8 + 16);
        assert_eq!(value_at(&g, 0, 0), Some(16));
        assert_eq!(value_at(&g, 1, 3), Some(32));
        assert_eq!(g.tile_count(), 2);
    }

    #[test]
    fn test_lock_overflow_stops_at_first_tile_above_ceiling() {
        let mut g = grid(4, 4);
        // Anchored on the top row, the rectangle's upper row lands at y = 4.
        let tiles =
            TileMatrix::from_rows(vec![vec![None, tile(2)], vec![tile(4), None]]).unwrap();

        assert!(g.lock(tiles, Point::new(0, 3)));
        assert!(g.game_over());
        // The top row is visited first, so the lower tile is never written.
        assert_eq!(g.tile_count(), 0);
        assert!(g.take_last_event().unwrap().overflowed);

        let mut g = grid(4, 4);
        let tiles = TileMatrix::from_rows(vec![
            vec![tile(2), None],
            vec![None, None],
            vec![None, tile(8)],
        ])
        .unwrap();
        // Anchor y = 2: matrix row 0 → y = 4 overflows immediately.
        assert!(g.lock(tiles, Point::new(1, 2)));
        assert_eq!(g.tile_count(), 0);
    }

    #[test]
    fn test_lock_records_event() {
        let mut g = grid(6, 4);
        g.set(0, 0, tile(2));
        assert!(!g.lock(TileMatrix::single(Tile::new(2).unwrap()), Point::new(0, 1)));

        let event = g.take_last_event().unwrap();
        assert_eq!(event.merges, 1);
        assert_eq!(event.score_gained, 4);
        assert_eq!(event.rounds, 1);
        assert!(!event.overflowed);
        assert!(g.take_last_event().is_none());
    }

    #[test]
    fn test_purge_floating_credits_removed_tiles() {
        let mut g = grid(6, 4);
        g.set(0, 0, tile(2));
        g.set(1, 0, tile(4));
        g.set(4, 2, tile(64));
        g.set(5, 3, tile(8));

        assert_eq!(g.purge_floating(), 2);
        assert_eq!(g.score(), 72);
        assert_eq!(g.tile_count(), 2);
    }

    #[test]
    fn test_win_latches_on_2048() {
        let mut g = grid(6, 4);
        g.set(0, 2, tile(1024));
        g.lock(TileMatrix::single(Tile::new(1024).unwrap()), Point::new(2, 1));
        assert!(g.win());
        assert_eq!(value_at(&g, 0, 2), Some(2048));

        g.lock(TileMatrix::single(Tile::new(2).unwrap()), Point::new(0, 0));
        assert!(g.win());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "lock onto occupied cell")]
    fn test_lock_onto_occupied_cell_is_rejected_in_debug() {
        let mut g = grid(6, 4);
        g.set(1, 0, tile(2));
        g.lock(TileMatrix::single(Tile::new(8).unwrap()), Point::new(0, 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "lock outside the grid")]
    fn test_lock_outside_side_wall_is_rejected_in_debug() {
        let mut g = grid(6, 4);
        g.lock(TileMatrix::single(Tile::new(8).unwrap()), Point::new(-1, 0));
    }
}
