//! Core domain types for five-in-a-row.

use serde::{Deserialize, Serialize};

/// Unique identifier for a participant.
pub type PlayerId = String;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 15;

/// Highest valid row or column index.
pub const MAX_INDEX: u8 = BOARD_SIZE - 1;

/// Number of cells on the board.
pub const CAPACITY: u16 = BOARD_SIZE as u16 * BOARD_SIZE as u16;

/// Stones in a row needed to win.
pub const WIN_LENGTH: u8 = 5;

/// Stone colour. Black always moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    /// Black (moves first).
    Black,
    /// White (moves second).
    White,
}

impl Stone {
    /// Returns the opposing colour.
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Single-character symbol used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a stone.
    Occupied(Stone),
}

impl Cell {
    /// Returns the stone in this cell, if any.
    pub fn stone(self) -> Option<Stone> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(stone) => Some(stone),
        }
    }
}

/// Role a participant holds with respect to a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Holds the black seat.
    Black,
    /// Holds the white seat.
    White,
    /// Holds no seat.
    Observer,
}

impl From<Stone> for Role {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Role::Black,
            Stone::White => Role::White,
        }
    }
}
