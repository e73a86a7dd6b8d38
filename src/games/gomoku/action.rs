//! First-class move types for five-in-a-row.
//!
//! Moves are domain events, not side effects: the session validates one
//! against its contracts before it touches the board.

use super::phases::Outcome;
use super::{PlayerId, Position, Stone};
use serde::{Deserialize, Serialize};

/// A stone placed on a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Colour of the stone.
    pub stone: Stone,
    /// Where it was placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(stone: Stone, position: Position) -> Self {
        Self { stone, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.stone, self.position.label())
    }
}

/// What happened after an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Game continues; this participant moves next.
    Continue {
        /// Participant to move next.
        next: PlayerId,
    },
    /// The move ended the game.
    GameOver(Outcome),
}

impl MoveOutcome {
    /// Returns the outcome if the move ended the game.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            MoveOutcome::Continue { .. } => None,
            MoveOutcome::GameOver(outcome) => Some(outcome),
        }
    }
}
