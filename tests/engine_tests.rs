//! Engine tests - movement, locking, scoring, gravity and garbage

use tetris_clash::core::pieces::shapes;
use tetris_clash::core::{collides, overlay, ActivePiece, GameEngine, Phase, PlayerState};
use tetris_clash::types::{GameAction, PieceKind, BOARD_WIDTH, EMPTY_CELL, GARBAGE_CELL};

/// Live engine around a hand-built state
fn engine_with(state: PlayerState) -> GameEngine {
    let mut engine = GameEngine::from_state(state, 7);
    engine.set_live(true);
    engine
}

fn state_with_active(piece: ActivePiece) -> PlayerState {
    let mut state = PlayerState::new(PieceKind::T);
    state.active = Some(piece);
    state
}

fn vertical_i(x: i8, y: i8) -> ActivePiece {
    ActivePiece {
        kind: PieceKind::I,
        shape: shapes(PieceKind::I)[1],
        x,
        y,
        rotation: 1,
    }
}

fn fill_row_except(state: &mut PlayerState, y: i8, hole_from: i8, hole_to: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        if x < hole_from || x > hole_to {
            state.board.set(x, y, GARBAGE_CELL);
        }
    }
}

#[test]
fn test_o_piece_soft_drop_to_floor() {
    let mut engine = engine_with(state_with_active(ActivePiece::spawn(PieceKind::O)));
    assert_eq!(engine.state().active.unwrap().x, 4);

    for _ in 0..18 {
        assert!(engine.soft_drop());
    }
    assert_eq!(engine.state().active.unwrap().y, 18);
    assert_eq!(engine.state().score, 18);

    // Blocked downward move locks
    assert!(engine.soft_drop());
    assert_eq!(engine.phase(), Phase::Empty);
    assert_eq!(engine.state().score, 18);
    let o = PieceKind::O.id();
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(engine.state().board.get(x, y), Some(o));
    }
}

#[test]
fn test_i_piece_single_line_clear() {
    let mut state = state_with_active(ActivePiece::spawn(PieceKind::I));
    fill_row_except(&mut state, 19, 3, 6);
    let mut engine = engine_with(state);

    let rows = engine.hard_drop().unwrap();
    assert_eq!(rows, 19);

    let event = engine.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.points, 100);
    assert_eq!(event.garbage_sent, 0);
    assert_eq!(engine.take_outgoing_garbage(), 0);

    let state = engine.state();
    assert_eq!(state.score, 2 * 19 + 100);
    assert_eq!(state.lines, 1);
    assert_eq!(state.level, 1);
    assert_eq!(state.board.filled_cells(), 0);
}

#[test]
fn test_vertical_i_fills_single_hole() {
    let mut state = state_with_active(vertical_i(4, 0));
    fill_row_except(&mut state, 19, 5, 5);
    let mut engine = engine_with(state);

    assert_eq!(engine.hard_drop(), Some(16));
    let event = engine.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.points, 100);
    assert_eq!(engine.take_outgoing_garbage(), 0);

    // The rest of the I settles one row lower in column 5
    let state = engine.state();
    assert_eq!(state.score, 2 * 16 + 100);
    assert_eq!(state.board.filled_cells(), 3);
    for y in 17..20 {
        assert_eq!(state.board.get(5, y), Some(PieceKind::I.id()));
    }
}

#[test]
fn test_left_wall_kick() {
    let mut engine = engine_with(state_with_active(vertical_i(-1, 5)));

    assert!(engine.rotate());
    let piece = engine.state().active.unwrap();
    assert_eq!(piece.rotation, 0);
    assert_eq!(piece.x, 0);
    assert_eq!(piece.y, 5);
    assert_eq!(piece.shape, shapes(PieceKind::I)[0]);
}

fn flat_t(x: i8, y: i8) -> ActivePiece {
    ActivePiece {
        kind: PieceKind::T,
        shape: shapes(PieceKind::T)[0],
        x,
        y,
        rotation: 0,
    }
}

/// Rotate a flat T at (3, 5) with `blocks` filled and return the new x
fn kicked_x(blocks: &[(i8, i8)]) -> i8 {
    let mut state = state_with_active(flat_t(3, 5));
    for &(x, y) in blocks {
        state.board.set(x, y, GARBAGE_CELL);
    }
    let mut engine = engine_with(state);
    assert!(engine.rotate());
    let piece = engine.state().active.unwrap();
    assert_eq!(piece.rotation, 1);
    assert_eq!(piece.y, 5);
    piece.x
}

#[test]
fn test_kick_order() {
    // Free space: no shift even though every kick would fit
    assert_eq!(kicked_x(&[]), 3);
    // Only the stem cell below is blocked; +1 and -1 both fit, +1 wins
    assert_eq!(kicked_x(&[(4, 7)]), 4);
    // +1 blocked too; -1 wins over +2
    assert_eq!(kicked_x(&[(4, 7), (5, 7)]), 2);
}

#[test]
fn test_rotation_without_room_is_noop() {
    // Vertical I in a one-wide well
    let mut state = state_with_active(vertical_i(3, 10));
    for y in 10..14 {
        fill_row_except(&mut state, y, 4, 4);
    }
    let mut engine = engine_with(state);
    let before = engine.state().clone();

    assert!(!engine.rotate());
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_blocked_sideways_move_has_no_effect() {
    let mut piece = ActivePiece::spawn(PieceKind::O);
    piece.x = 0;
    let mut engine = engine_with(state_with_active(piece));
    let revision = engine.revision();

    assert!(!engine.move_left());
    assert_eq!(engine.revision(), revision);
    assert_eq!(engine.phase(), Phase::Active);
    assert!(engine.move_right());
}

#[test]
fn test_garbage_emission_table() {
    let expected = [(1, 0), (2, 1), (3, 2), (4, 4)];
    for (lines, garbage) in expected {
        let mut state = state_with_active(vertical_i(-1, 0));
        for y in (20 - lines)..20 {
            fill_row_except(&mut state, y, 0, 0);
        }
        let mut engine = engine_with(state);

        engine.hard_drop();
        let event = engine.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, lines as u32);
        assert_eq!(event.garbage_sent, garbage);
        assert_eq!(engine.take_outgoing_garbage(), garbage);
        assert_eq!(engine.take_outgoing_garbage(), 0);
    }
}

#[test]
fn test_level_bonus_uses_level_before_lock() {
    let mut state = state_with_active(vertical_i(-1, 0));
    state.lines = 9;
    state.level = 1;
    for y in 18..20 {
        fill_row_except(&mut state, y, 0, 0);
    }
    let mut engine = engine_with(state);
    engine.hard_drop();

    let event = engine.take_last_event().unwrap();
    // Double at level 1, then the level goes up
    assert_eq!(event.points, 300);
    assert_eq!(engine.state().lines, 11);
    assert_eq!(engine.state().level, 2);
    assert_eq!(engine.drop_interval_ms(), 800);
}

#[test]
fn test_spawn_game_over_keeps_garbage() {
    let mut state = PlayerState::new(PieceKind::O);
    state.incoming_garbage = 19;
    let mut engine = engine_with(state);

    assert!(engine.tick(0));
    assert_eq!(engine.phase(), Phase::Over);
    let state = engine.state();
    assert!(state.game_over);
    assert!(state.active.is_none());
    assert_eq!(state.incoming_garbage, 0);
    assert_eq!(state.board.filled_cells(), 19 * 9);
    assert!(!engine.gravity_armed());

    // Over only leaves through a reset
    assert!(!engine.tick(10_000));
    assert!(!engine.move_left());
    engine.start();
    assert_eq!(engine.phase(), Phase::Active);
}

#[test]
fn test_garbage_applied_with_next_spawn() {
    let mut engine = GameEngine::new(17);
    engine.start();
    assert!(engine.receive_garbage(1));
    assert!(engine.receive_garbage(2));
    assert_eq!(engine.state().incoming_garbage, 3);

    engine.hard_drop();
    engine.tick(0);

    let state = engine.state();
    assert_eq!(state.incoming_garbage, 0);
    for y in 17..20 {
        assert_eq!(
            state.board.row(y).iter().filter(|&&c| c == EMPTY_CELL).count(),
            1
        );
    }
}

#[test]
fn test_gravity_interval_by_level() {
    for (level, interval) in [(1, 1000), (2, 800), (3, 640), (12, 100), (30, 100)] {
        let mut state = PlayerState::new(PieceKind::T);
        state.level = level;
        let engine = GameEngine::from_state(state, 1);
        assert_eq!(engine.drop_interval_ms(), interval);
    }
}

#[test]
fn test_gravity_fires_only_while_live() {
    let mut engine = engine_with(state_with_active(ActivePiece::spawn(PieceKind::T)));
    assert!(engine.gravity_armed());

    engine.set_live(false);
    assert!(!engine.gravity_armed());
    assert!(!engine.tick(5_000));
    assert_eq!(engine.state().active.unwrap().y, 0);

    engine.set_live(true);
    assert!(engine.tick(1_000));
    assert_eq!(engine.state().active.unwrap().y, 1);
}

#[test]
fn test_gravity_locks_on_floor() {
    let mut piece = ActivePiece::spawn(PieceKind::O);
    piece.y = 18;
    let mut engine = engine_with(state_with_active(piece));

    assert!(engine.tick(1_000));
    assert_eq!(engine.phase(), Phase::Empty);
    assert_eq!(engine.state().score, 0);

    assert!(engine.tick(0));
    assert_eq!(engine.phase(), Phase::Active);
}

#[test]
fn test_moves_never_leave_piece_colliding() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::MoveLeft,
        GameAction::MoveLeft,
        GameAction::HardDrop,
    ];

    let mut engine = GameEngine::new(4242);
    engine.start();
    let mut last_score = 0;

    for step in 0..600 {
        let action = actions[(step * 7 + step / 5) % actions.len()];
        engine.apply(action);
        engine.tick(16);

        let state = engine.state();
        if let Some(piece) = state.active {
            assert!(!collides(&piece, &state.board, 0, 0, None), "step {}", step);
        }
        assert!(state.score >= last_score, "score decreased at step {}", step);
        last_score = state.score;

        if engine.phase() == Phase::Over {
            break;
        }
    }
}

#[test]
fn test_overlay_leaves_state_untouched() {
    let mut engine = GameEngine::new(9);
    engine.start();
    let before = engine.state().clone();

    let view = overlay(engine.state());
    assert_eq!(view.filled_cells(), 4);
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameEngine::new(77);
    let mut b = GameEngine::new(77);
    a.start();
    b.start();
    for _ in 0..10 {
        a.hard_drop();
        b.hard_drop();
        a.tick(16);
        b.tick(16);
        a.receive_garbage(1);
        b.receive_garbage(1);
    }
    assert_eq!(a.state(), b.state());
}
