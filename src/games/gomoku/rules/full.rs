//! Board-full rule.
//!
//! Five-in-a-row has no draw here: when the last empty cell is filled
//! without anyone completing a line, the second player takes the game as
//! compensation for not moving first.

use super::super::{Board, CAPACITY, Stone};
use tracing::instrument;

/// Side awarded the game when the board fills without a line of five.
pub const TIE_BREAK_WINNER: Stone = Stone::White;

/// Checks if the board is full (all 225 cells occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.stone_count() >= CAPACITY
}

/// Returns the tie-break winner if the board is full.
pub fn tie_break(board: &Board) -> Option<Stone> {
    is_full(board).then_some(TIE_BREAK_WINNER)
}
