//! Matchmaking registry: seats participants and routes calls to sessions.
//!
//! Every session is keyed by an explicit [`SessionId`]. A participant can be
//! seated in at most one live session at a time; the registry keeps a
//! participant → session map for [`SessionManager::lookup_session`] and
//! releases both entries as soon as a game ends.

use crate::clock::{Clock, SystemClock};
use crate::config::GameConfig;
use crate::games::gomoku::{
    Cell, GameError, GameSession, MoveOutcome, Outcome, PlayerId, RevokeState, Role, Status,
    Stone,
};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// A table being seated, and its game once both seats are filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Session ID.
    pub id: SessionId,
    /// Time limits for the game.
    pub config: GameConfig,
    /// Black seat holder.
    pub black: Option<PlayerId>,
    /// White seat holder.
    pub white: Option<PlayerId>,
    /// The game, created when the second seat is filled.
    pub game: Option<GameSession>,
}

impl Table {
    fn new(id: SessionId, config: GameConfig) -> Self {
        Self {
            id,
            config,
            black: None,
            white: None,
            game: None,
        }
    }

    fn seat(&self, stone: Stone) -> &Option<PlayerId> {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    fn seat_mut(&mut self, stone: Stone) -> &mut Option<PlayerId> {
        match stone {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
        }
    }

    /// Seat held by `participant`, if any.
    pub fn seat_of(&self, participant: &str) -> Option<Stone> {
        if self.black.as_deref() == Some(participant) {
            Some(Stone::Black)
        } else if self.white.as_deref() == Some(participant) {
            Some(Stone::White)
        } else {
            None
        }
    }

    fn game(&self) -> Result<&GameSession, GameError> {
        self.game.as_ref().ok_or(GameError::WaitingForOpponent)
    }

    fn game_mut(&mut self) -> Result<&mut GameSession, GameError> {
        self.game.as_mut().ok_or(GameError::WaitingForOpponent)
    }
}

#[derive(Debug, Default)]
struct Registry {
    tables: HashMap<SessionId, Table>,
    seated: HashMap<PlayerId, SessionId>,
}

impl Registry {
    fn table(&self, id: &str) -> Result<&Table, GameError> {
        self.tables
            .get(id)
            .ok_or_else(|| GameError::SessionNotFound(id.to_string()))
    }

    fn session_of(&self, participant: &str) -> Result<SessionId, GameError> {
        self.seated
            .get(participant)
            .cloned()
            .ok_or_else(|| GameError::NoActiveSession(participant.to_string()))
    }

    /// Runs `op` on the game of table `id`, releasing the seats if the game
    /// is over afterwards.
    fn with_game<T>(
        &mut self,
        id: &str,
        op: impl FnOnce(&mut GameSession) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let table = self
            .tables
            .get_mut(id)
            .ok_or_else(|| GameError::SessionNotFound(id.to_string()))?;
        let game = table.game_mut()?;
        let result = op(game)?;
        if game.status() == Status::Ended {
            self.release(id);
        }
        Ok(result)
    }

    fn release(&mut self, id: &str) {
        let before = self.seated.len();
        self.seated.retain(|_, session| session.as_str() != id);
        debug!(session_id = id, released = before - self.seated.len(), "Released seats");
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    registry: Arc<Mutex<Registry>>,
    clock: Arc<dyn Clock>,
    default_config: GameConfig,
}

impl SessionManager {
    /// Creates a session manager on the wall clock with default limits.
    #[instrument]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), GameConfig::default())
    }

    /// Creates a session manager with an explicit clock and default limits
    /// for tables created by [`SessionManager::join`].
    #[instrument]
    pub fn with_clock(clock: Arc<dyn Clock>, default_config: GameConfig) -> Self {
        info!("Creating session manager");
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
            clock,
            default_config,
        }
    }

    /// Time-dependent calls read the clock only after taking this lock, so
    /// `now` is never older than a mutation already committed.
    fn lock(&self) -> Result<MutexGuard<'_, Registry>, GameError> {
        self.registry.lock().map_err(|_| GameError::RegistryPoisoned)
    }

    /// Creates an empty table with the default limits.
    #[instrument(skip(self))]
    pub fn create_session(&self, id: SessionId) -> Result<SessionId, GameError> {
        self.create_session_with(id, self.default_config)
    }

    /// Creates an empty table with explicit limits.
    #[instrument(skip(self))]
    pub fn create_session_with(
        &self,
        id: SessionId,
        config: GameConfig,
    ) -> Result<SessionId, GameError> {
        let mut registry = self.lock()?;
        if registry.tables.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(GameError::SessionExists(id));
        }
        registry.tables.insert(id.clone(), Table::new(id.clone(), config));
        info!(session_id = %id, "Created new session");
        Ok(id)
    }

    /// Seats `participant` at table `session_id`, creating the table if it
    /// does not exist. The game is created once both seats are filled.
    #[instrument(skip(self))]
    pub fn join(
        &self,
        session_id: &str,
        participant: &str,
        seat: Stone,
    ) -> Result<(), GameError> {
        let mut registry = self.lock()?;
        let default_config = self.default_config;
        let Registry { tables, seated } = &mut *registry;

        if let Some(other) = seated.get(participant).filter(|other| *other != session_id) {
            warn!(participant, other_session = %other, "Participant seated elsewhere");
            return Err(GameError::AlreadyInSession {
                player: participant.to_string(),
                session: other.clone(),
            });
        }

        let table = tables
            .entry(session_id.to_string())
            .or_insert_with(|| Table::new(session_id.to_string(), default_config));

        if let Some(game) = &table.game
            && game.status() != Status::NotStarted
        {
            warn!(participant, status = %game.status(), "Join after the game started");
            return Err(GameError::AlreadyStarted);
        }
        if table.seat_of(participant).is_some_and(|held| held != seat) {
            warn!(participant, "Participant already holds the other seat");
            return Err(GameError::SelfMatchNotAllowed(participant.to_string()));
        }
        if let Some(holder) = table.seat(seat) {
            warn!(participant, %seat, %holder, "Seat taken");
            return Err(GameError::SeatTaken {
                seat,
                holder: holder.clone(),
            });
        }
        *table.seat_mut(seat) = Some(participant.to_string());
        seated.insert(participant.to_string(), session_id.to_string());
        info!(participant, %seat, "Participant seated");

        if let (Some(black), Some(white)) = (&table.black, &table.white) {
            let game = GameSession::new(
                session_id.to_string(),
                black.clone(),
                white.clone(),
                table.config,
            )?;
            table.game = Some(game);
            info!("Both seats filled, game created");
        }
        Ok(())
    }

    /// Starts the game. Only the black seat holder may start it, and only
    /// once both seats are filled.
    #[instrument(skip(self))]
    pub fn start_game(&self, session_id: &str, caller: &str) -> Result<(), GameError> {
        let mut registry = self.lock()?;
        let now = self.clock.now();
        let table = registry
            .tables
            .get_mut(session_id)
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))?;
        if table.black.as_deref() != Some(caller) {
            warn!(caller, "Start attempted by non-black participant");
            return Err(GameError::OnlyBlackMayStart(caller.to_string()));
        }
        table.game_mut()?.start_game(now)
    }

    /// Returns the session `participant` is seated in.
    #[instrument(skip(self))]
    pub fn lookup_session(&self, participant: &str) -> Result<SessionId, GameError> {
        self.lock()?.session_of(participant)
    }

    /// Places the caller's stone in the session they are seated in.
    #[instrument(skip(self))]
    pub fn make_move(
        &self,
        caller: &str,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, GameError> {
        let mut registry = self.lock()?;
        let now = self.clock.now();
        let session_id = registry.session_of(caller)?;
        registry.with_game(&session_id, |game| game.make_move(caller, row, col, now))
    }

    /// Ends a game whose player to move has run out of time. Anyone may call.
    #[instrument(skip(self))]
    pub fn end_game_on_timeout(&self, session_id: &str) -> Result<Outcome, GameError> {
        let mut registry = self.lock()?;
        let now = self.clock.now();
        registry.with_game(session_id, |game| game.end_game_on_timeout(now))
    }

    /// Asks to take back the caller's last move.
    #[instrument(skip(self))]
    pub fn request_revoke(&self, caller: &str) -> Result<(), GameError> {
        let mut registry = self.lock()?;
        let now = self.clock.now();
        let session_id = registry.session_of(caller)?;
        registry.with_game(&session_id, |game| game.request_revoke(caller, now))
    }

    /// Answers the open revoke request in the caller's session.
    #[instrument(skip(self))]
    pub fn answer_revoke(&self, caller: &str, approve: bool) -> Result<RevokeState, GameError> {
        let mut registry = self.lock()?;
        let now = self.clock.now();
        let session_id = registry.session_of(caller)?;
        registry.with_game(&session_id, |game| game.answer_revoke(caller, approve, now))
    }

    /// Seat held by `participant` at table `session_id`.
    pub fn role_of(&self, session_id: &str, participant: &str) -> Result<Role, GameError> {
        let registry = self.lock()?;
        let table = registry.table(session_id)?;
        Ok(table.seat_of(participant).map_or(Role::Observer, Role::from))
    }

    /// Content of a cell.
    pub fn cell_at(&self, session_id: &str, row: usize, col: usize) -> Result<Cell, GameError> {
        self.lock()?.table(session_id)?.game()?.cell_at(row, col)
    }

    /// Participant whose turn it is.
    pub fn current_turn_player(&self, session_id: &str) -> Result<PlayerId, GameError> {
        Ok(self
            .lock()?
            .table(session_id)?
            .game()?
            .current_turn_player()
            .clone())
    }

    /// Time left for the player to move.
    pub fn remaining_turn_time(&self, session_id: &str) -> Result<TimeDelta, GameError> {
        let registry = self.lock()?;
        let now = self.clock.now();
        Ok(registry.table(session_id)?.game()?.remaining_turn_time(now))
    }

    /// Winner of an ended game.
    pub fn winner(&self, session_id: &str) -> Result<PlayerId, GameError> {
        let registry = self.lock()?;
        let table = registry.table(session_id)?;
        match &table.game {
            Some(game) => game.winner().cloned(),
            None => Err(GameError::NoWinnerYet),
        }
    }

    /// Copy of the game in `session_id`.
    pub fn snapshot(&self, session_id: &str) -> Result<GameSession, GameError> {
        Ok(self.lock()?.table(session_id)?.game()?.clone())
    }

    /// Copy of table `session_id`, including open seats.
    pub fn table(&self, session_id: &str) -> Result<Table, GameError> {
        Ok(self.lock()?.table(session_id)?.clone())
    }

    /// Removes table `session_id` and frees its seats. Returns the table as
    /// it was, so a host can archive finished games before dropping them.
    #[instrument(skip(self))]
    pub fn remove_session(&self, session_id: &str) -> Result<Table, GameError> {
        let mut registry = self.lock()?;
        let table = registry
            .tables
            .remove(session_id)
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))?;
        registry.release(session_id);
        info!(session_id, "Removed session");
        Ok(table)
    }

    /// Lists all session IDs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, GameError> {
        let registry = self.lock()?;
        let mut ids: Vec<_> = registry.tables.keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        Ok(ids)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
