//! Turn parity invariant: whose turn it is follows from the stone counts.

use super::super::{GameSession, Status, Stone};
use super::Invariant;

/// Invariant: Black moves first and players strictly alternate.
///
/// While the game is running, Black is to move exactly when both sides have
/// the same number of stones, and White exactly when Black has one more.
/// Before the start the board is empty; after the end Black is ahead by at
/// most one.
pub struct TurnParityInvariant;

impl Invariant<GameSession> for TurnParityInvariant {
    fn holds(session: &GameSession) -> bool {
        let black = session.board().count(Stone::Black);
        let white = session.board().count(Stone::White);
        match session.status() {
            Status::NotStarted => black == 0 && white == 0,
            Status::Active => match session.stone_to_move() {
                Stone::Black => black == white,
                Stone::White => black == white + 1,
            },
            Status::Ended => black == white || black == white + 1,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns, Black first"
    }
}
