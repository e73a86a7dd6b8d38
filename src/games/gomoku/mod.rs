//! Five-in-a-row on a 15x15 board.

mod action;
mod board;
pub mod contracts;
mod error;
mod game;
pub mod invariants;
mod phases;
mod position;
mod revoke;
pub mod rules;
mod types;

pub use action::{Move, MoveOutcome};
pub use board::Board;
pub use error::GameError;
pub use game::GameSession;
pub use phases::{EndReason, Outcome, Status};
pub use position::{Position, PositionParseError};
pub use revoke::RevokeState;
pub use types::{BOARD_SIZE, CAPACITY, Cell, MAX_INDEX, PlayerId, Role, Stone, WIN_LENGTH};
