//! The game session state machine.
//!
//! `NotStarted → Active → Ended`, never backwards. Every time-dependent
//! operation takes `now` explicitly so a session is a pure function of the
//! calls made on it. Timeouts are detected lazily: nothing happens when a
//! deadline passes until someone calls [`GameSession::make_move`] or
//! [`GameSession::end_game_on_timeout`].

use super::action::{Move, MoveOutcome};
use super::contracts::{LegalMove, MoveRequest, assert_post};
use super::phases::{EndReason, Outcome, Status};
use super::revoke::RevokeState;
use super::{Board, Cell, GameError, PlayerId, Role, Stone, rules};
use crate::config::GameConfig;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// One two-player game from seating through conclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub(super) id: String,
    pub(super) player_black: PlayerId,
    pub(super) player_white: PlayerId,
    pub(super) config: GameConfig,
    pub(super) board: Board,
    pub(super) status: Status,
    pub(super) black_to_move: bool,
    pub(super) last_move_time: DateTime<Utc>,
    pub(super) stone_count: u16,
    pub(super) last_move: Option<Move>,
    pub(super) outcome: Option<Outcome>,
    pub(super) revoke: RevokeState,
}

impl GameSession {
    /// Creates a session with both seats assigned. Black moves first.
    ///
    /// Fails with [`GameError::SelfMatchNotAllowed`] when both seats name
    /// the same participant.
    #[instrument(skip(config))]
    pub fn new(
        id: String,
        player_black: PlayerId,
        player_white: PlayerId,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        if player_black == player_white {
            warn!("Same participant in both seats");
            return Err(GameError::SelfMatchNotAllowed(player_black));
        }
        info!(session_id = %id, "Creating game session");
        Ok(Self {
            id,
            player_black,
            player_white,
            config,
            board: Board::new(),
            status: Status::NotStarted,
            black_to_move: true,
            last_move_time: DateTime::UNIX_EPOCH,
            stone_count: 0,
            last_move: None,
            outcome: None,
            revoke: RevokeState::NoRequest,
        })
    }

    /// Starts the game: Black to move, turn clock starts at `now`.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn start_game(&mut self, now: DateTime<Utc>) -> Result<(), GameError> {
        if self.status != Status::NotStarted {
            warn!(status = %self.status, "Start rejected");
            return Err(GameError::AlreadyStarted);
        }
        self.black_to_move = true;
        self.last_move_time = now;
        self.status = Status::Active;
        info!(black = %self.player_black, white = %self.player_white, "Game started");
        Ok(())
    }

    /// Places the caller's stone at `(row, col)`.
    ///
    /// Checks, in order: the game is active, it is the caller's turn, the
    /// turn has not timed out, the cell is on the board, the cell is empty.
    /// On success the stone is placed, the turn clock restarts, and the game
    /// either ends (five in a row, or a full board going to White) or passes
    /// the turn to the opponent.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn make_move(
        &mut self,
        caller: &str,
        row: usize,
        col: usize,
        now: DateTime<Utc>,
    ) -> Result<MoveOutcome, GameError> {
        let request = MoveRequest {
            caller,
            row,
            col,
            now,
        };
        let pos = LegalMove::check(self, &request).inspect_err(|error| {
            warn!(caller, row, col, %error, "Move rejected");
        })?;

        let before = cfg!(debug_assertions).then(|| self.clone());

        let stone = self.stone_to_move();
        self.board.set_stone(stone, pos);
        self.stone_count += 1;
        self.last_move_time = now;
        self.last_move = Some(Move::new(stone, pos));
        self.revoke = RevokeState::NoRequest;
        debug!(%stone, position = %pos, stone_count = self.stone_count, "Stone placed");

        let result = match rules::judge(&self.board, pos, stone) {
            Some((winning_stone, reason)) => MoveOutcome::GameOver(self.finish(winning_stone, reason)),
            None => {
                self.black_to_move = !self.black_to_move;
                MoveOutcome::Continue {
                    next: self.current_turn_player().clone(),
                }
            }
        };

        if let Some(before) = before {
            assert_post(&before, self);
        }
        Ok(result)
    }

    /// Ends the game because the player to move let the turn clock run out.
    ///
    /// Anyone may call this; the opponent of the player to move wins.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn end_game_on_timeout(&mut self, now: DateTime<Utc>) -> Result<Outcome, GameError> {
        if self.status != Status::Active {
            return Err(GameError::GameNotActive);
        }
        if !self.is_turn_expired(now) {
            debug!(remaining = %self.remaining_turn_time(now), "Timeout claim too early");
            return Err(GameError::TurnStillActive);
        }
        let winning_stone = self.stone_to_move().opponent();
        Ok(self.finish(winning_stone, EndReason::Timeout))
    }

    fn finish(&mut self, winning_stone: Stone, reason: EndReason) -> Outcome {
        let outcome = Outcome {
            winner: self.player(winning_stone).clone(),
            loser: self.player(winning_stone.opponent()).clone(),
            winning_stone,
            reason,
        };
        self.status = Status::Ended;
        self.outcome = Some(outcome.clone());
        info!(%outcome, "Game ended");
        outcome
    }

    /// Returns true once the turn clock has run past the limit.
    pub fn is_turn_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_move_time) > self.config.turn_time_limit()
    }

    /// Time left for the player to move.
    ///
    /// Zero or negative once expired. Before the start this is the full
    /// limit; after the end it is zero.
    pub fn remaining_turn_time(&self, now: DateTime<Utc>) -> TimeDelta {
        match self.status {
            Status::NotStarted => self.config.turn_time_limit(),
            Status::Active => {
                let elapsed = now.signed_duration_since(self.last_move_time);
                self.config
                    .turn_time_limit()
                    .checked_sub(&elapsed)
                    .unwrap_or(TimeDelta::MIN)
            }
            Status::Ended => TimeDelta::zero(),
        }
    }

    /// Colour whose turn it is.
    pub fn stone_to_move(&self) -> Stone {
        if self.black_to_move {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Participant whose turn it is.
    pub fn current_turn_player(&self) -> &PlayerId {
        self.player(self.stone_to_move())
    }

    /// Participant holding the seat of `stone`.
    pub fn player(&self, stone: Stone) -> &PlayerId {
        match stone {
            Stone::Black => &self.player_black,
            Stone::White => &self.player_white,
        }
    }

    /// Seat held by `participant`, or `Observer`.
    pub fn role_of(&self, participant: &str) -> Role {
        if self.player_black == participant {
            Role::Black
        } else if self.player_white == participant {
            Role::White
        } else {
            Role::Observer
        }
    }

    /// Content of a cell. Fails with [`GameError::OutOfBounds`] off the board.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        self.board.cell_at(row, col)
    }

    /// Winner of an ended game.
    pub fn winner(&self) -> Result<&PlayerId, GameError> {
        self.outcome
            .as_ref()
            .map(|outcome| &outcome.winner)
            .ok_or(GameError::NoWinnerYet)
    }

    /// Outcome of an ended game.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lifecycle phase.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Stones placed so far.
    pub fn stone_count(&self) -> u16 {
        self.stone_count
    }

    /// Most recent move still on the board.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// When the turn clock last restarted.
    pub fn last_move_time(&self) -> DateTime<Utc> {
        self.last_move_time
    }

    /// Time limits this session was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
