//! Win detection for five-in-a-row.
//!
//! Only lines through the most recent move are examined: a move changes a
//! single cell, so a new line can only pass through that cell.

use super::super::{Board, Position, Stone, WIN_LENGTH};
use super::super::types::MAX_INDEX;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One of the four lines through a cell.
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
pub enum Axis {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Axis {
    /// Unit step `(d_row, d_col)` in the forward direction of the axis.
    pub fn step(self) -> (i8, i8) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Result of checking the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinCheck {
    /// The move did not complete a line.
    NoWin,
    /// The move completed a line of five or more for this side.
    Winner(Stone),
}

/// Number of steps from `pos` to the board edge going `(d_row, d_col)`.
fn steps_to_edge(pos: Position, (d_row, d_col): (i8, i8)) -> u8 {
    let along = |coord: u8, delta: i8| match delta {
        1 => MAX_INDEX - coord,
        -1 => coord,
        _ => MAX_INDEX,
    };
    along(pos.row(), d_row).min(along(pos.col(), d_col))
}

/// Counts contiguous `stone` cells walking away from `pos`, not counting
/// `pos` itself.
///
/// The walk is bounded by the distance to the edge, computed before the
/// loop and counted down to zero.
fn run_towards(board: &Board, pos: Position, stone: Stone, (d_row, d_col): (i8, i8)) -> u8 {
    let mut remaining = steps_to_edge(pos, (d_row, d_col));
    let mut cursor = pos;
    let mut run = 0;
    while remaining > 0 {
        remaining -= 1;
        let Some(next) = cursor.offset(d_row, d_col) else {
            break;
        };
        if !board.has(stone, next) {
            break;
        }
        run += 1;
        cursor = next;
    }
    run
}

/// Length of the run of `stone` through `pos` along `axis`, counting the
/// cell at `pos` as one stone.
pub fn run_length(board: &Board, pos: Position, stone: Stone, axis: Axis) -> u8 {
    let (d_row, d_col) = axis.step();
    1 + run_towards(board, pos, stone, (d_row, d_col)) + run_towards(board, pos, stone, (-d_row, -d_col))
}

/// Longest run of `stone` through `pos` and the axis it lies on.
///
/// Ties go to the first axis in declaration order.
pub fn longest_run(board: &Board, pos: Position, stone: Stone) -> (Axis, u8) {
    <Axis as strum::IntoEnumIterator>::iter()
        .map(|axis| (axis, run_length(board, pos, stone, axis)))
        .fold((Axis::Horizontal, 0), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        })
}

/// Checks whether the stone just placed on `pos` completed a line of five
/// or more.
///
/// Axes are scanned in order and the first one reaching five decides.
#[instrument(skip(board))]
pub fn check_winner(board: &Board, pos: Position, stone: Stone) -> WinCheck {
    for axis in <Axis as strum::IntoEnumIterator>::iter() {
        let run = run_length(board, pos, stone, axis);
        if run >= WIN_LENGTH {
            debug!(%axis, run, "Line completed");
            return WinCheck::Winner(stone);
        }
    }
    WinCheck::NoWin
}
