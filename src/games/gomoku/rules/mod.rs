//! Game rules for five-in-a-row.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from session
//! state so they can be tested, and composed into contracts, on their own.

pub mod full;
pub mod win;

pub use full::{TIE_BREAK_WINNER, is_full, tie_break};
pub use win::{Axis, WinCheck, check_winner, longest_run, run_length};

use super::{Board, EndReason, Position, Stone};

/// Decides whether the stone just placed on `pos` ends the game.
///
/// A completed line wins outright; otherwise a full board goes to the
/// tie-break winner.
pub fn judge(board: &Board, pos: Position, stone: Stone) -> Option<(Stone, EndReason)> {
    if let WinCheck::Winner(winner) = check_winner(board, pos, stone) {
        return Some((winner, EndReason::FiveInARow));
    }
    tie_break(board).map(|winner| (winner, EndReason::BoardFull))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_on_last_cell_beats_tie_break() {
        // Black fills the board with a line through the last cell.
        let mut board = Board::new();
        for pos in Position::all() {
            board.set_stone(Stone::Black, pos);
        }
        let last = Position::new(14, 14).unwrap();
        assert_eq!(
            judge(&board, last, Stone::Black),
            Some((Stone::Black, EndReason::FiveInARow))
        );
    }

    #[test]
    fn test_quiet_move_continues() {
        let mut board = Board::new();
        let pos = Position::new(7, 7).unwrap();
        board.set_stone(Stone::Black, pos);
        assert_eq!(judge(&board, pos, Stone::Black), None);
    }
}
