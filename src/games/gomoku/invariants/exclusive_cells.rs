//! Exclusive cells invariant: no cell holds two stones.

use super::super::GameSession;
use super::Invariant;

/// Invariant: a cell is Empty, Black or White, never set on both sides.
pub struct ExclusiveCellsInvariant;

impl Invariant<GameSession> for ExclusiveCellsInvariant {
    fn holds(session: &GameSession) -> bool {
        session.board().cells_exclusive()
    }

    fn description() -> &'static str {
        "No cell is occupied by both sides"
    }
}
