//! Error taxonomy for game sessions and the session registry.
//!
//! Every variant is a caller error reported synchronously. Broken internal
//! invariants are not represented here: they are bugs and surface as debug
//! assertions (see [`super::invariants`]).

use super::{PlayerId, Position, Stone};

/// Error raised by a rejected session or registry operation.
///
/// A call that returns an error has had no effect on any state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The requested seat already has a holder.
    #[display("{seat} seat is already taken by {holder}")]
    SeatTaken {
        /// Seat that was requested.
        seat: Stone,
        /// Participant holding it.
        holder: PlayerId,
    },

    /// The participant already holds the other seat of this session.
    #[display("{} cannot play against themselves", _0)]
    SelfMatchNotAllowed(PlayerId),

    /// The participant is not seated in any live session.
    #[display("{} has no active session", _0)]
    NoActiveSession(PlayerId),

    /// The game has already been started.
    #[display("Game has already been started")]
    AlreadyStarted,

    /// The game is not accepting moves (not started, or already over).
    #[display("Game is not active")]
    GameNotActive,

    /// The caller is not the participant expected to act.
    #[display("It is not {}'s turn", _0)]
    NotYourTurn(PlayerId),

    /// The coordinates fall outside the 15x15 board.
    #[display("({row}, {col}) is outside the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a stone.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// The turn deadline has passed; the game must be ended on timeout.
    #[display("Turn time limit exceeded")]
    TurnTimedOut,

    /// The turn deadline has not passed yet.
    #[display("Turn time limit has not been exceeded")]
    TurnStillActive,

    /// The game has not ended.
    #[display("Game has no winner yet")]
    NoWinnerYet,

    /// No session with this identifier exists.
    #[display("Session {} not found", _0)]
    SessionNotFound(String),

    /// A session with this identifier already exists.
    #[display("Session {} already exists", _0)]
    SessionExists(String),

    /// The participant is seated in a different live session.
    #[display("{player} is already seated in session {session}")]
    AlreadyInSession {
        /// Participant that tried to join.
        player: PlayerId,
        /// Session they are seated in.
        session: String,
    },

    /// Both seats must be filled before the game can start.
    #[display("Waiting for an opponent to join")]
    WaitingForOpponent,

    /// Only the black seat holder may start the game.
    #[display("{} does not hold the black seat", _0)]
    OnlyBlackMayStart(PlayerId),

    /// There is no move the caller may take back.
    #[display("Nothing to revoke")]
    NothingToRevoke,

    /// A revoke request is already awaiting an answer.
    #[display("A revoke request is already pending")]
    RevokePending,

    /// There is no open revoke request to answer.
    #[display("No revoke request is pending")]
    NoRevokePending,

    /// Too much time has passed since the move to ask for it back.
    #[display("Revoke request window has closed")]
    RevokeWindowClosed,

    /// A previous holder of the registry lock panicked.
    #[display("Session registry lock poisoned")]
    RegistryPoisoned,
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = GameError::SeatTaken {
            seat: Stone::Black,
            holder: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "Black seat is already taken by alice");

        let err = GameError::OutOfBounds { row: 15, col: 3 };
        assert!(err.to_string().contains("outside"));
    }
}
