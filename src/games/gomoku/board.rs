//! Bit-packed 15x15 board.
//!
//! Each side owns fifteen 16-bit words, one per row; bit `col` of word `row`
//! is set when that side has a stone on `(row, col)`. Row-major words keep
//! horizontal scans to single-word bit tests.

use super::error::GameError;
use super::position::Position;
use super::types::{BOARD_SIZE, CAPACITY, Cell, MAX_INDEX, Stone};
use serde::{Deserialize, Serialize};
use tracing::instrument;

type Rows = [u16; BOARD_SIZE as usize];

/// Stone placement for both sides.
///
/// A cell is never set in both matrices; [`Board::set_stone`] relies on the
/// caller having checked vacancy, which the move contracts do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    black: Rows,
    white: Rows,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            black: [0; BOARD_SIZE as usize],
            white: [0; BOARD_SIZE as usize],
        }
    }

    fn rows(&self, stone: Stone) -> &Rows {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    fn rows_mut(&mut self, stone: Stone) -> &mut Rows {
        match stone {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
        }
    }

    /// Places a stone. The cell must be empty on both sides.
    pub fn set_stone(&mut self, stone: Stone, pos: Position) {
        debug_assert!(self.is_empty(pos), "set_stone on occupied cell {pos}");
        self.rows_mut(stone)[pos.row() as usize] |= 1 << pos.col();
    }

    /// Sets a bit without the vacancy check, for corrupting state in tests.
    #[cfg(test)]
    pub(crate) fn force_stone(&mut self, stone: Stone, pos: Position) {
        self.rows_mut(stone)[pos.row() as usize] |= 1 << pos.col();
    }

    /// Removes whatever stone sits on `pos`.
    pub fn clear(&mut self, pos: Position) {
        let mask = !(1u16 << pos.col());
        self.black[pos.row() as usize] &= mask;
        self.white[pos.row() as usize] &= mask;
    }

    /// Returns true when `stone` has a stone on `pos`.
    pub fn has(&self, stone: Stone, pos: Position) -> bool {
        self.rows(stone)[pos.row() as usize] & (1 << pos.col()) != 0
    }

    /// Returns the content of a cell.
    pub fn cell(&self, pos: Position) -> Cell {
        if self.has(Stone::Black, pos) {
            Cell::Occupied(Stone::Black)
        } else if self.has(Stone::White, pos) {
            Cell::Occupied(Stone::White)
        } else {
            Cell::Empty
        }
    }

    /// Returns the content of a cell given raw coordinates.
    #[instrument(skip(self))]
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        Position::new(row, col).map(|pos| self.cell(pos))
    }

    /// Checks if a cell is empty on both sides.
    pub fn is_empty(&self, pos: Position) -> bool {
        !self.has(Stone::Black, pos) && !self.has(Stone::White, pos)
    }

    /// Number of stones `stone` has on the board.
    pub fn count(&self, stone: Stone) -> u16 {
        self.rows(stone).iter().map(|row| row.count_ones() as u16).sum()
    }

    /// Total number of stones on the board.
    pub fn stone_count(&self) -> u16 {
        self.count(Stone::Black) + self.count(Stone::White)
    }

    /// Checks if every cell holds a stone.
    pub fn is_full(&self) -> bool {
        self.stone_count() == CAPACITY
    }

    /// Returns true when no cell is set for both sides.
    pub fn cells_exclusive(&self) -> bool {
        self.black
            .iter()
            .zip(self.white.iter())
            .all(|(black, white)| black & white == 0)
    }

    /// Formats the board with column letters and one-based row numbers.
    pub fn display(&self) -> String {
        let mut out = String::from("   ");
        for col in 0..BOARD_SIZE {
            out.push(' ');
            out.push((b'A' + col) as char);
        }
        out.push('\n');
        for pos in Position::all() {
            if pos.col() == 0 {
                out.push_str(&format!("{:>3}", pos.row() + 1));
            }
            out.push(' ');
            out.push(match self.cell(pos) {
                Cell::Empty => '.',
                Cell::Occupied(stone) => stone.symbol(),
            });
            if pos.col() == MAX_INDEX {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
