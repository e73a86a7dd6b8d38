//! Contract-based validation for moves.
//!
//! Preconditions are named checks run in a fixed order, so a request that
//! breaks several rules always reports the same error. Postconditions are
//! the invariant set plus the single-stone growth of the board.

use super::invariants::{GomokuInvariants, InvariantSet, InvariantViolation};
use super::{GameError, GameSession, Position, Status};
use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: `{P(state, action)}` must hold before applying the action.
/// - Postcondition: `{Q(before, after)}` must hold after applying it.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// A participant asking to place a stone at raw coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest<'a> {
    /// Participant making the call.
    pub caller: &'a str,
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub col: usize,
    /// Time of the call.
    pub now: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must be active.
pub struct GameIsActive;

impl GameIsActive {
    /// Fails with [`GameError::GameNotActive`] unless the session is active.
    pub fn check(session: &GameSession) -> Result<(), GameError> {
        if session.status() == Status::Active {
            Ok(())
        } else {
            Err(GameError::GameNotActive)
        }
    }
}

/// Precondition: the caller must be the participant to move.
pub struct CallersTurn;

impl CallersTurn {
    /// Fails with [`GameError::NotYourTurn`] for anyone else, observers included.
    pub fn check(session: &GameSession, caller: &str) -> Result<(), GameError> {
        if session.current_turn_player() == caller {
            Ok(())
        } else {
            Err(GameError::NotYourTurn(caller.to_string()))
        }
    }
}

/// Precondition: the turn deadline must not have passed.
pub struct WithinTurnTime;

impl WithinTurnTime {
    /// Fails with [`GameError::TurnTimedOut`] once the deadline has passed.
    pub fn check(session: &GameSession, now: DateTime<Utc>) -> Result<(), GameError> {
        if session.is_turn_expired(now) {
            Err(GameError::TurnTimedOut)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the coordinates must be on the board.
pub struct InBounds;

impl InBounds {
    /// Returns the validated position.
    pub fn check(row: usize, col: usize) -> Result<Position, GameError> {
        Position::new(row, col)
    }
}

/// Precondition: the target cell must be empty on both sides.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`GameError::CellOccupied`] when a stone is already there.
    pub fn check(session: &GameSession, pos: Position) -> Result<(), GameError> {
        if session.board().is_empty(pos) {
            Ok(())
        } else {
            Err(GameError::CellOccupied(pos))
        }
    }
}

/// Composite precondition: all move checks, in order.
pub struct LegalMove;

impl LegalMove {
    /// Validates a move request and returns the target position.
    #[instrument(skip(session), fields(session_id = %session.id()))]
    pub fn check(session: &GameSession, request: &MoveRequest<'_>) -> Result<Position, GameError> {
        GameIsActive::check(session)?;
        CallersTurn::check(session, request.caller)?;
        WithinTurnTime::check(session, request.now)?;
        let pos = InBounds::check(request.row, request.col)?;
        CellIsEmpty::check(session, pos)?;
        Ok(pos)
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: active, caller's turn, within time, on the board, empty cell.
///
/// Postconditions: exactly one more stone, and all session invariants hold.
pub struct MoveContract;

impl Contract<GameSession, MoveRequest<'_>> for MoveContract {
    fn pre(session: &GameSession, request: &MoveRequest<'_>) -> Result<(), GameError> {
        LegalMove::check(session, request).map(|_| ())
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = GomokuInvariants::check_all(after).err().unwrap_or_default();
        if after.stone_count() != before.stone_count() + 1 {
            violations.push(InvariantViolation::new(
                "An accepted move adds exactly one stone",
            ));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            warn!(?violations, "Move postcondition failed");
            Err(violations)
        }
    }
}

/// Panics in debug builds if an accepted move broke a postcondition.
pub fn assert_post(before: &GameSession, after: &GameSession) {
    if cfg!(debug_assertions)
        && let Err(violations) = MoveContract::post(before, after)
    {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Postcondition failed: {}", descriptions);
    }
}
