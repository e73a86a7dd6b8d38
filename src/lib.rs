//! Strictly Gomoku - type-safe five-in-a-row engine
//!
//! A deterministic two-player game on a 15x15 board with enforced turn
//! ownership, move legality, win detection and timeout forfeiture.
//!
//! # Architecture
//!
//! - **Games**: the five-in-a-row engine (bit-packed board, win checker,
//!   session state machine, optional revoke exchange)
//! - **Session**: matchmaking registry keyed by explicit session IDs
//! - **Clock**: injectable source of the current time
//! - **Config**: per-session time limits, loadable from TOML
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{MoveOutcome, SessionManager, Stone};
//!
//! # fn example() -> Result<(), strictly_gomoku::GameError> {
//! let manager = SessionManager::new();
//! manager.join("table-1", "alice", Stone::Black)?;
//! manager.join("table-1", "bob", Stone::White)?;
//! manager.start_game("table-1", "alice")?;
//!
//! let outcome = manager.make_move("alice", 7, 7)?;
//! assert_eq!(outcome, MoveOutcome::Continue { next: "bob".to_string() });
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clock;
mod config;
mod games;
mod session;

// Crate-level exports - Time
pub use clock::{Clock, ManualClock, SystemClock};

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV_VAR, ConfigError, GameConfig};

// Crate-level exports - Session management
pub use session::{SessionId, SessionManager, Table};

// Crate-level exports - Game types (five-in-a-row)
pub use games::gomoku::{
    BOARD_SIZE, Board, CAPACITY, Cell, EndReason, GameError, GameSession, MAX_INDEX, Move,
    MoveOutcome, Outcome, PlayerId, Position, PositionParseError, RevokeState, Role, Status,
    Stone, WIN_LENGTH, contracts, invariants, rules,
};
