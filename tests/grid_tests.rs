//! Grid tests - lock pipeline scenarios

use tetris_2048::core::{Grid, Tile, TileMatrix};
use tetris_2048::types::{BoardDims, Point};

fn grid(height: usize, width: usize) -> Grid {
    Grid::new(BoardDims::new(height, width).unwrap())
}

fn single(value: u32) -> TileMatrix {
    TileMatrix::single(Tile::new(value).unwrap())
}

/// Rows listed top to bottom; 0 means empty
fn matrix(rows: &[&[u32]]) -> TileMatrix {
    TileMatrix::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|&v| Tile::new(v)).collect::<Vec<_>>()),
    )
    .unwrap()
}

fn put(grid: &mut Grid, row: i32, col: i32, value: u32) {
    assert!(grid.set(row, col, Tile::new(value)));
}

fn value_at(grid: &Grid, row: i32, col: i32) -> Option<u32> {
    grid.get(row, col).map(|t| t.value())
}

#[test]
fn test_grid_new_empty() {
    let grid = grid(6, 4);
    assert_eq!(grid.height(), 6);
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.tile_count(), 0);
    assert_eq!(grid.score(), 0);
    assert!(!grid.win());
    assert!(!grid.game_over());
}

#[test]
fn test_out_of_range_queries_are_false() {
    let grid = grid(6, 4);
    assert!(!grid.is_inside(-1, 0));
    assert!(!grid.is_inside(0, -1));
    assert!(!grid.is_inside(6, 0));
    assert!(!grid.is_inside(0, 4));
    assert!(grid.is_inside(5, 3));

    assert!(!grid.is_occupied(-1, 0));
    assert!(!grid.is_occupied(6, 3));
    assert!(grid.get(100, 100).is_none());
}

#[test]
fn test_two_stacked_twos_merge_into_four() {
    let mut grid = grid(6, 4);

    assert!(!grid.lock(single(2), Point::new(0, 0)));
    assert!(!grid.lock(single(2), Point::new(0, 1)));

    assert_eq!(value_at(&grid, 0, 0), Some(4));
    assert_eq!(grid.tile_count(), 1);
    assert_eq!(grid.score(), 4);
    assert!(!grid.win());
}

#[test]
fn test_merge_cascades_upward_through_column() {
    let mut grid = grid(6, 4);
    put(&mut grid, 0, 0, 8);
    put(&mut grid, 1, 0, 4);

    assert!(!grid.lock(single(4), Point::new(0, 2)));

    // 4 + 4 = 8, then 8 + 8 = 16.
    assert_eq!(value_at(&grid, 0, 0), Some(16));
    assert_eq!(grid.tile_count(), 1);
    assert_eq!(grid.score(), 24);

    let event = grid.take_last_event().unwrap();
    assert_eq!(event.merges, 2);
    assert_eq!(event.score_gained, 24);
}

#[test]
fn test_merge_gap_lets_upper_tile_settle() {
    let mut grid = grid(6, 4);
    put(&mut grid, 0, 0, 2);

    // Vertical pair: 8 on top of 2.
    assert!(!grid.lock(matrix(&[&[8], &[2]]), Point::new(0, 1)));

    assert_eq!(value_at(&grid, 0, 0), Some(4));
    assert_eq!(value_at(&grid, 1, 0), Some(8));
    assert!(!grid.is_occupied(2, 0));

    let event = grid.take_last_event().unwrap();
    assert_eq!(event.merges, 1);
    assert_eq!(event.settle_drops, 1);
}

#[test]
fn test_locking_the_gap_clears_bottom_row() {
    let mut grid = grid(6, 4);
    put(&mut grid, 0, 0, 2);
    put(&mut grid, 0, 1, 4);
    put(&mut grid, 0, 2, 8);
    put(&mut grid, 1, 0, 16);
    put(&mut grid, 2, 0, 64);

    assert!(!grid.lock(single(32), Point::new(3, 0)));

    // Row 0 scores 2 + 4 + 8 + 32, the column above shifts down one.
    assert_eq!(grid.score(), 46);
    assert_eq!(value_at(&grid, 0, 0), Some(16));
    assert_eq!(value_at(&grid, 1, 0), Some(64));
    assert_eq!(grid.tile_count(), 2);

    let event = grid.take_last_event().unwrap();
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.score_gained, 46);
}

#[test]
fn test_clear_exposes_new_merge_in_next_round() {
    let mut grid = grid(6, 4);
    put(&mut grid, 0, 0, 4);
    put(&mut grid, 1, 0, 2);
    put(&mut grid, 1, 1, 8);
    put(&mut grid, 1, 2, 16);
    put(&mut grid, 2, 0, 4);

    assert!(!grid.lock(single(32), Point::new(3, 1)));

    // Row 1 clears (58), then the two 4s meet and merge (8).
    assert_eq!(value_at(&grid, 0, 0), Some(8));
    assert_eq!(grid.tile_count(), 1);
    assert_eq!(grid.score(), 66);

    let event = grid.take_last_event().unwrap();
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.merges, 1);
    assert_eq!(event.rounds, 2);
}

#[test]
fn test_floating_lock_settles_as_a_mass() {
    let mut grid = grid(6, 4);

    // A 2×2 block locked mid-air drops to the floor intact.
    assert!(!grid.lock(matrix(&[&[2, 4], &[8, 16]]), Point::new(1, 3)));

    assert_eq!(value_at(&grid, 0, 1), Some(8));
    assert_eq!(value_at(&grid, 0, 2), Some(16));
    assert_eq!(value_at(&grid, 1, 1), Some(2));
    assert_eq!(value_at(&grid, 1, 2), Some(4));
    assert_eq!(grid.score(), 0);
}

#[test]
fn test_overhang_connected_sideways_stays_put() {
    let mut grid = grid(6, 4);
    put(&mut grid, 0, 0, 2);

    // L-shaped payload: the right tile hangs over an empty cell.
    assert!(!grid.lock(matrix(&[&[8, 16]]), Point::new(0, 1)));

    assert_eq!(value_at(&grid, 1, 0), Some(8));
    assert_eq!(value_at(&grid, 1, 1), Some(16));
    assert!(!grid.is_occupied(0, 1));
}

#[test]
fn test_tile_above_ceiling_ends_game() {
    let mut grid = grid(6, 4);

    assert!(grid.lock(matrix(&[&[2], &[4]]), Point::new(0, 5)));
    assert!(grid.game_over());
    assert_eq!(grid.tile_count(), 0);
    assert!(grid.take_last_event().unwrap().overflowed);
}

#[test]
fn test_reaching_2048_latches_win() {
    let mut grid = grid(6, 4);
    put(&mut grid, 0, 0, 1024);

    assert!(!grid.lock(single(1024), Point::new(0, 1)));
    assert!(grid.win());
    assert!(!grid.game_over());
    assert_eq!(grid.score(), 2048);

    // Later locks keep the flag.
    assert!(!grid.lock(single(2), Point::new(3, 0)));
    assert!(grid.win());
}

#[test]
fn test_purge_floating_is_opt_in() {
    let mut grid = grid(6, 4);
    put(&mut grid, 0, 0, 2);
    put(&mut grid, 3, 2, 8);
    put(&mut grid, 4, 2, 4);

    assert_eq!(grid.purge_floating(), 2);
    assert_eq!(grid.score(), 12);
    assert_eq!(grid.tile_count(), 1);
}
