//! Board tests - grid mutation, row clearing and garbage

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tetris_clash::core::pieces::shapes;
use tetris_clash::core::Board;
use tetris_clash::types::{
    PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL, GARBAGE_CELL,
};

fn fill_row_except(board: &mut Board, y: i8, hole: Option<i8>, value: u8) {
    for x in 0..BOARD_WIDTH as i8 {
        if Some(x) != hole {
            board.set(x, y, value);
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.rows().count(), BOARD_HEIGHT as usize);
    assert!(board.cells().iter().all(|&c| c == EMPTY_CELL));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_occupied(-1, 5));
}

#[test]
fn test_stamp_writes_kind_id() {
    let mut board = Board::new();
    let t = shapes(PieceKind::T)[0];
    assert_eq!(board.stamp(&t, 0, 18, PieceKind::T), 4);
    assert_eq!(board.get(1, 18), Some(6));
    assert_eq!(board.get(0, 19), Some(6));
    assert_eq!(board.get(2, 19), Some(6));
    assert_eq!(board.get(0, 18), Some(EMPTY_CELL));
}

#[test]
fn test_clear_counts_and_preserves_dimensions() {
    for full in 0..=6 {
        let mut board = Board::new();
        for i in 0..full {
            fill_row_except(&mut board, 19 - i, None, 1 + (i as u8 % 7));
        }
        // A nearly full row above them must survive.
        fill_row_except(&mut board, 19 - full, Some(3), GARBAGE_CELL);

        assert_eq!(board.clear_full_rows(), full as usize);
        assert_eq!(board.to_rows().len(), BOARD_HEIGHT as usize);
        assert!(board.to_rows().iter().all(|r| r.len() == BOARD_WIDTH as usize));
        assert_eq!(board.get(3, 19), Some(EMPTY_CELL));
        assert_eq!(board.filled_cells(), BOARD_WIDTH as usize - 1);
        assert!(!board.is_row_full(19));
    }
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, None, 2);
    board.set(0, 18, 5);
    fill_row_except(&mut board, 17, None, 3);
    board.set(9, 16, 7);

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.get(9, 18), Some(7));
    assert_eq!(board.get(0, 19), Some(5));
    assert_eq!(board.filled_cells(), 2);
}

#[test]
fn test_garbage_rows_have_exactly_one_hole() {
    for seed in 0..32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::new();
        board.inject_garbage(5, &mut rng);

        for y in 15..20 {
            let row = board.row(y);
            assert_eq!(row.iter().filter(|&&c| c == EMPTY_CELL).count(), 1);
            assert_eq!(row.iter().filter(|&&c| c == GARBAGE_CELL).count(), 9);
        }
        assert_eq!(board.filled_cells(), 45);
    }
}

#[test]
fn test_garbage_holes_vary() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut board = Board::new();
    board.inject_garbage(20, &mut rng);

    let holes: Vec<usize> = (0..20)
        .map(|y| board.row(y).iter().position(|&c| c == EMPTY_CELL).unwrap())
        .collect();
    assert!(holes.iter().any(|&h| h != holes[0]), "holes: {:?}", holes);
}

#[test]
fn test_garbage_pushes_top_row_out() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut board = Board::new();
    board.set(0, 0, 4);
    board.set(0, 1, 5);

    board.inject_garbage(1, &mut rng);

    assert_eq!(board.get(0, 0), Some(5));
    assert_eq!(board.to_rows().len(), BOARD_HEIGHT as usize);
}
