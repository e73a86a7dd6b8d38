//! Optional one-move undo ("revoke").
//!
//! The player who just moved may ask to take the move back; their opponent
//! approves or denies. The exchange is a small state machine of its own,
//! gated by the session's revoke time limits:
//!
//! ```text
//! NoRequest ──request──▶ Requested ──approve──▶ Approved
//!                            │ ────deny──────▶ Denied
//!                            └ ────too late──▶ ExpiredRequest
//! ```
//!
//! Only one request is allowed per move. Any accepted move resets the
//! machine to `NoRequest`. Sessions that never use it behave exactly as if
//! it did not exist.

use super::invariants::{GomokuInvariants, InvariantSet};
use super::{GameError, GameSession, PlayerId, Stone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// State of the revoke exchange for the current move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RevokeState {
    /// No request for the current move.
    #[default]
    NoRequest,
    /// Awaiting the opponent's answer.
    Requested {
        /// Side asking for its move back.
        requester: Stone,
        /// When the request was made.
        requested_at: DateTime<Utc>,
    },
    /// The move was taken back.
    Approved,
    /// The opponent refused.
    Denied,
    /// The opponent did not answer within the wait limit.
    ExpiredRequest,
}

impl GameSession {
    /// Returns the state of the revoke exchange.
    pub fn revoke_state(&self) -> RevokeState {
        self.revoke
    }

    /// Asks to take back the last move.
    ///
    /// Only the author of the last move may ask, once per move, and only
    /// within the revoke request limit of having made it.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn request_revoke(&mut self, caller: &str, now: DateTime<Utc>) -> Result<(), GameError> {
        if self.status != super::Status::Active {
            return Err(GameError::GameNotActive);
        }
        let last = self.last_move.ok_or(GameError::NothingToRevoke)?;
        if self.player(last.stone) != caller {
            warn!(caller, "Revoke requested by someone other than the mover");
            return Err(GameError::NothingToRevoke);
        }
        match self.revoke {
            RevokeState::NoRequest => {}
            RevokeState::Requested { .. } => return Err(GameError::RevokePending),
            RevokeState::Approved | RevokeState::Denied | RevokeState::ExpiredRequest => {
                return Err(GameError::RevokeWindowClosed);
            }
        }
        if now.signed_duration_since(self.last_move_time) > self.config.revoke_request_limit() {
            return Err(GameError::RevokeWindowClosed);
        }

        self.revoke = RevokeState::Requested {
            requester: last.stone,
            requested_at: now,
        };
        info!(caller, position = %last.position, "Revoke requested");
        Ok(())
    }

    /// Answers an open revoke request. Returns the resolved state.
    ///
    /// Only the requester's opponent may answer. An answer arriving after the
    /// wait limit resolves the request as [`RevokeState::ExpiredRequest`]
    /// whatever it says. Approval removes the last stone and hands the turn
    /// back to the requester with a fresh turn clock.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn answer_revoke(
        &mut self,
        caller: &str,
        approve: bool,
        now: DateTime<Utc>,
    ) -> Result<RevokeState, GameError> {
        if self.status != super::Status::Active {
            return Err(GameError::GameNotActive);
        }
        let RevokeState::Requested {
            requester,
            requested_at,
        } = self.revoke
        else {
            return Err(GameError::NoRevokePending);
        };
        if self.player(requester.opponent()) != caller {
            return Err(GameError::NotYourTurn(caller.to_string()));
        }
        if self.is_turn_expired(now) {
            return Err(GameError::TurnTimedOut);
        }

        if now.signed_duration_since(requested_at) > self.config.revoke_wait_limit() {
            info!(caller, "Revoke request expired");
            self.revoke = RevokeState::ExpiredRequest;
            return Ok(self.revoke);
        }

        if !approve {
            info!(caller, "Revoke denied");
            self.revoke = RevokeState::Denied;
            return Ok(self.revoke);
        }

        let last = self.last_move.take().ok_or(GameError::NothingToRevoke)?;
        self.board.clear(last.position);
        self.stone_count -= 1;
        self.black_to_move = requester == Stone::Black;
        self.last_move_time = now;
        self.revoke = RevokeState::Approved;
        info!(caller, position = %last.position, "Revoke approved, stone removed");

        debug_assert!(
            GomokuInvariants::check_all(self).is_ok(),
            "Invariants broken by revoke"
        );
        Ok(self.revoke)
    }

    /// Participant who asked for the pending revoke, if any.
    pub fn revoke_requester(&self) -> Option<&PlayerId> {
        match self.revoke {
            RevokeState::Requested { requester, .. } => Some(self.player(requester)),
            _ => None,
        }
    }
}
