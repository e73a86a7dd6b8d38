//! Stone count invariant: the counter matches the board.

use super::super::{CAPACITY, GameSession};
use super::Invariant;

/// Invariant: the session's stone counter equals the number of set bits
/// across both sides, and never exceeds board capacity.
pub struct StoneCountInvariant;

impl Invariant<GameSession> for StoneCountInvariant {
    fn holds(session: &GameSession) -> bool {
        let counted = session.board().stone_count();
        session.stone_count() == counted && counted <= CAPACITY
    }

    fn description() -> &'static str {
        "Stone count matches the stones on the board"
    }
}
