use crate::board::Board;
use crate::game_state::PlayerState;

/// Board as a renderer should draw it: locked cells plus the falling piece.
///
/// Returns a copy; the state is untouched.
pub fn overlay(state: &PlayerState) -> Board {
    let mut board = state.board.clone();
    if let Some(piece) = state.active {
        board.stamp(&piece.shape, piece.x, piece.y, piece.kind);
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::ActivePiece;
    use crate::types::PieceKind;

    #[test]
    fn test_overlay_includes_active_piece() {
        let mut state = PlayerState::new(PieceKind::T);
        state.active = Some(ActivePiece::spawn(PieceKind::O));

        let view = overlay(&state);
        assert_eq!(view.get(4, 0), Some(PieceKind::O.id()));
        assert_eq!(view.get(5, 1), Some(PieceKind::O.id()));
        assert_eq!(view.filled_cells(), 4);
        assert_eq!(state.board.filled_cells(), 0);
    }

    #[test]
    fn test_overlay_without_piece_is_board() {
        let mut state = PlayerState::new(PieceKind::T);
        state.board.set(0, 19, 8);
        assert_eq!(overlay(&state), state.board);
    }
}
