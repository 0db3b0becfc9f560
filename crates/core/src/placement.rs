//! Placement validation - the single authority on whether a piece fits
//!
//! A candidate fits when every filled cell is inside the side walls, above the
//! floor, and not on a locked cell. Cells above the top row (negative y) are
//! always allowed so pieces can spawn partially off-screen.

use crate::board::Board;
use crate::pieces::{Piece, Shape};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Check whether `piece` shifted by (`dx`, `dy`) fits on `board`
pub fn is_valid(piece: &Piece, board: &Board, dx: i8, dy: i8) -> bool {
    is_valid_shape(&piece.shape, piece.x + dx, piece.y + dy, board)
}

/// Check whether `shape` anchored at (`x`, `y`) fits on `board`
pub fn is_valid_shape(shape: &Shape, x: i8, y: i8, board: &Board) -> bool {
    shape.filled().all(|(dx, dy)| {
        let bx = x + dx;
        let by = y + dy;
        if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
            return false;
        }
        by < 0 || !board.is_occupied(bx, by)
    })
}

/// Whether the piece is resting on the floor or the stack
pub fn is_grounded(piece: &Piece, board: &Board) -> bool {
    !is_valid(piece, board, 0, 1)
}

/// How many rows the piece can fall before it rests
///
/// Bounded by the board height, so it terminates even for a piece that does
/// not currently fit.
pub fn drop_distance(piece: &Piece, board: &Board) -> u32 {
    let mut distance: i8 = 0;
    while distance < BOARD_HEIGHT as i8 && is_valid(piece, board, 0, distance + 1) {
        distance += 1;
    }
    distance as u32
}
