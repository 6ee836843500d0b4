//! Collision checks for candidate piece placements

use crate::board::Board;
use crate::pieces::{ActivePiece, Shape};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `piece`, offset by `(dx, dy)` and optionally using another shape,
/// would overlap a wall, the floor, or a filled cell.
///
/// Rows above the board (negative y) never collide, so pieces may rotate and
/// spawn partially out of view.
pub fn collides(
    piece: &ActivePiece,
    board: &Board,
    dx: i8,
    dy: i8,
    shape_override: Option<&Shape>,
) -> bool {
    let shape = shape_override.unwrap_or(&piece.shape);
    let origin_x = piece.x + dx;
    let origin_y = piece.y + dy;

    shape.minos().any(|(col, row)| {
        let x = origin_x + col;
        let y = origin_y + row;
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && board.is_occupied(x, y)
    })
}

/// Largest downward offset the piece can take without colliding
pub fn drop_distance(piece: &ActivePiece, board: &Board) -> u32 {
    let mut distance: i8 = 0;
    while !collides(piece, board, 0, distance + 1, None) {
        distance += 1;
    }
    distance as u32
}
