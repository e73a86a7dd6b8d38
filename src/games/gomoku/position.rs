//! Validated board coordinates.

use super::error::GameError;
use super::types::{BOARD_SIZE, MAX_INDEX};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Column letters used by board notation, left to right.
const COLUMN_LETTERS: &[u8; BOARD_SIZE as usize] = b"ABCDEFGHIJKLMNO";

/// A cell on the 15x15 board.
///
/// Both coordinates are always in `0..15`; the only ways to obtain a
/// `Position` are the checked constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, failing with [`GameError::OutOfBounds`] when
    /// either coordinate is 15 or more.
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Row index (0 is the top row).
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column index (0 is the left column).
    pub fn col(self) -> u8 {
        self.col
    }

    /// Returns the neighbouring position one step of `(d_row, d_col)` away,
    /// or `None` when that step leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row <= MAX_INDEX && col <= MAX_INDEX).then_some(Self { row, col })
    }

    /// Iterates every position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }

    /// Board notation label, e.g. `H8` for row 7, column 7.
    pub fn label(self) -> String {
        format!(
            "{}{}",
            COLUMN_LETTERS[self.col as usize] as char,
            self.row + 1
        )
    }

    /// Parses `"row col"`, `"row,col"` (zero-based) or board notation
    /// such as `"H8"` (column letter, one-based row).
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, PositionParseError> {
        let trimmed = input.trim();
        let fail = || PositionParseError::new(trimmed);

        let numbers: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        if let [row, col] = numbers.as_slice()
            && let Ok(row) = row.parse::<usize>()
        {
            let col: usize = col.parse().map_err(|_| fail())?;
            return Self::new(row, col).map_err(|_| fail());
        }

        // Board notation, allowing a separator between letter and row
        let joined = numbers.concat();
        let mut chars = joined.chars();
        let letter = chars.next().ok_or_else(fail)?.to_ascii_uppercase();
        let col = COLUMN_LETTERS
            .iter()
            .position(|&l| l as char == letter)
            .ok_or_else(fail)?;
        let row: usize = chars.as_str().parse().map_err(|_| fail())?;
        let row = row.checked_sub(1).ok_or_else(fail)?;
        Self::new(row, col).map_err(|_| fail())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Text that does not name a board position.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Cannot parse position from {:?}", input)]
pub struct PositionParseError {
    /// Offending input.
    pub input: String,
}

impl PositionParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}
