//! Session phases and game outcomes.

use super::{PlayerId, Stone};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session. Transitions only move forward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum Status {
    /// Seats assigned, waiting for `start_game`.
    #[default]
    NotStarted,
    /// Accepting moves.
    Active,
    /// Terminal; no further mutation.
    Ended,
}

/// Why a game ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum EndReason {
    /// The winner completed a line of five or more.
    FiveInARow,
    /// The board filled up; the second player takes the game.
    BoardFull,
    /// The loser failed to move within the turn time limit.
    Timeout,
}

/// Outcome of an ended game. There are no draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Winning participant.
    pub winner: PlayerId,
    /// Losing participant.
    pub loser: PlayerId,
    /// Colour the winner played.
    pub winning_stone: Stone,
    /// How the game was decided.
    pub reason: EndReason,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let how = match self.reason {
            EndReason::FiveInARow => "five in a row",
            EndReason::BoardFull => "board full, second player takes it",
            EndReason::Timeout => "opponent ran out of time",
        };
        write!(
            f,
            "{} ({}) beats {} by {}",
            self.winner, self.winning_stone, self.loser, how
        )
    }
}
