//! Piece tests - movement, rotation, collision and lock payloads

use tetris_2048::core::{spawn_pattern, Grid, SimpleRng, Tetromino, Tile};
use tetris_2048::types::{BoardDims, Direction, PieceKind, Point};

fn dims(height: usize, width: usize) -> BoardDims {
    BoardDims::new(height, width).unwrap()
}

/// Where a `(row, col)` cell of an N×N square lands after a clockwise turn
fn rotated(n: usize, (r, c): (usize, usize)) -> (usize, usize) {
    (c, n - 1 - r)
}

fn lowest_y(piece: &Tetromino) -> i32 {
    piece.cells().map(|(p, _)| p.y).min().unwrap()
}

#[test]
fn test_o_piece_stops_at_left_wall() {
    let d = dims(20, 4);
    let grid = Grid::new(d);
    let mut rng = SimpleRng::new(1);
    let mut piece = Tetromino::spawn(PieceKind::O, d, &mut rng);
    assert_eq!(piece.anchor().x, 1);

    let results: Vec<bool> = (0..4)
        .map(|_| piece.try_move(Direction::Left, &grid))
        .collect();

    assert_eq!(results, vec![true, false, false, false]);
    assert_eq!(piece.anchor().x, 0);
}

#[test]
fn test_move_right_stops_at_right_wall() {
    let d = dims(20, 12);
    let grid = Grid::new(d);
    let mut rng = SimpleRng::new(2);
    let mut piece = Tetromino::spawn(PieceKind::T, d, &mut rng);

    let mut moves = 0;
    while piece.try_move(Direction::Right, &grid) {
        moves += 1;
        assert!(moves < 20, "piece left the board");
    }

    let rightmost = piece.cells().map(|(p, _)| p.x).max().unwrap();
    assert_eq!(rightmost, 11);
}

#[test]
fn test_rotations_keep_shape_and_tiles() {
    let d = dims(20, 12);
    let grid = Grid::new(d);
    let mut rng = SimpleRng::new(3);

    for kind in PieceKind::ALL {
        let mut piece = Tetromino::spawn(kind, d, &mut rng);
        let n = piece.size();
        assert_eq!(n, kind.matrix_size());

        for turn in 1..=4 {
            let before = piece.clone();
            assert!(piece.try_move(Direction::Rotate, &grid), "{:?} turn {}", kind, turn);

            for (r, c) in before.occupied_offsets() {
                let (nr, nc) = rotated(n, (r, c));
                assert_eq!(piece.tile(nr, nc), before.tile(r, c), "{:?} turn {}", kind, turn);
            }
            assert_eq!(piece.occupied_offsets().len(), 4);
        }

        // Four quarter turns restore the spawn pattern.
        let mut expected = spawn_pattern(kind).to_vec();
        expected.sort();
        assert_eq!(piece.occupied_offsets().to_vec(), expected, "{:?}", kind);
    }
}

#[test]
fn test_rotation_is_rejected_instead_of_kicked() {
    let d = dims(20, 4);
    let grid = Grid::new(d);
    let mut rng = SimpleRng::new(4);
    let mut piece = Tetromino::spawn(PieceKind::I, d, &mut rng);

    // Vertical I in column 1 of its square; push it to the left wall.
    while piece.try_move(Direction::Left, &grid) {}
    let anchor = piece.anchor();
    assert_eq!(anchor.x, -1);

    // A horizontal bar would need column -1.
    assert!(!piece.can_move(Direction::Rotate, &grid));
    assert!(!piece.try_move(Direction::Rotate, &grid));
    assert_eq!(piece.anchor(), anchor);
}

#[test]
fn test_collision_with_locked_tiles() {
    let d = dims(10, 8);
    let mut grid = Grid::new(d);
    let mut rng = SimpleRng::new(5);
    let mut piece = Tetromino::spawn(PieceKind::O, d, &mut rng);

    while piece.try_move(Direction::Down, &grid) {}
    assert_eq!(lowest_y(&piece), 0);
    assert!(!piece.can_move(Direction::Down, &grid));

    // Block the column to the left of the piece's bottom row.
    let left = piece.cells().map(|(p, _)| p.x).min().unwrap() - 1;
    assert!(grid.set(0, left, Tile::new(2)));
    assert!(!piece.can_move(Direction::Left, &grid));
    assert!(piece.can_move(Direction::Right, &grid));

    // A fresh piece over the blocking tile stops on top of it.
    let mut next = Tetromino::spawn(PieceKind::O, d, &mut rng);
    assert!(next.try_move(Direction::Left, &grid));
    assert!(next.try_move(Direction::Left, &grid));
    assert_eq!(next.anchor().x, left - 1);
    while next.try_move(Direction::Down, &grid) {}
    assert_eq!(lowest_y(&next), 1);
}

#[test]
fn test_cells_above_ceiling_never_collide() {
    let d = dims(6, 6);
    let grid = Grid::new(d);
    let mut rng = SimpleRng::new(6);
    let mut piece = Tetromino::spawn(PieceKind::I, d, &mut rng);

    assert!(piece.cells().any(|(p, _)| p.y >= 6));
    assert!(piece.can_move(Direction::Left, &grid));
    assert!(piece.try_move(Direction::Rotate, &grid));
    assert!(piece.try_move(Direction::Rotate, &grid));
}

#[test]
fn test_lock_payload_lands_where_the_piece_was() {
    let d = dims(20, 12);
    let mut grid = Grid::new(d);
    let mut rng = SimpleRng::new(7);
    let mut piece = Tetromino::spawn(PieceKind::S, d, &mut rng);
    while piece.try_move(Direction::Down, &grid) {}

    let expected: Vec<(Point, u32)> = piece.cells().map(|(p, t)| (p, t.value())).collect();
    let payload = piece.bounded_tiles_for_lock();
    assert_eq!((payload.tiles.height(), payload.tiles.width()), (2, 3));

    // Write the payload ourselves and compare positions.
    let rows = payload.tiles.height();
    let placed: Vec<(Point, u32)> = payload
        .tiles
        .clone()
        .into_cells()
        .map(|(r, c, t)| {
            let x = payload.anchor.x + c as i32;
            let y = payload.anchor.y + (rows - 1 - r) as i32;
            (Point::new(x, y), t.value())
        })
        .collect();
    let mut a = expected.clone();
    let mut b = placed;
    a.sort_by_key(|(p, _)| (p.y, p.x));
    b.sort_by_key(|(p, _)| (p.y, p.x));
    assert_eq!(a, b);

    assert!(!grid.lock(payload.tiles, payload.anchor));
    assert!(grid.tile_count() > 0);
}

#[test]
fn test_unknown_shape_tag() {
    let mut rng = SimpleRng::new(8);
    let err = Tetromino::from_tag("X", dims(20, 12), &mut rng).unwrap_err();
    assert_eq!(err.to_string(), "unknown tetromino type \"X\"");

    for tag in ["I", "o", " T ", "z"] {
        assert!(Tetromino::from_tag(tag, dims(20, 12), &mut rng).is_ok(), "{}", tag);
    }
}
