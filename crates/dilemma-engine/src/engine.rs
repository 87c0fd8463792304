//! Game engine: one concurrent match per opponent
//!
//! Per opponent the engine moves between three states:
//! - no session: the next `play` creates one and plays no round
//! - active with `n < moves_to_play` rounds: `play` scores one round
//! - finished: the round that reaches `moves_to_play` removes the session
//!   in the same call that returns its final snapshot
//!
//! A session idle for longer than the timeout counts as absent and is
//! replaced on next contact. The engine is the only writer of its store.

use std::io::{Read, Write};
use std::path::Path;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::{ConfigError, PersistError};
use crate::payoff::PayoffMatrix;
use crate::persistence::{self, Snapshot};
use crate::session::{Session, Timestamp};
use crate::store::SessionStore;
use crate::strategy::{Move, Strategy};

/// What a call to `Engine::play` did. Every variant carries the session
/// snapshot as it stood after the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// New session opened. The incoming move was not played.
    Started(Session),
    /// One round scored; the game goes on.
    Played(Session),
    /// Final round scored; the session is no longer in the store.
    Finished(Session),
}

impl Turn {
    pub fn session(&self) -> &Session {
        match self {
            Turn::Started(s) | Turn::Played(s) | Turn::Finished(s) => s,
        }
    }

    pub fn into_session(self) -> Session {
        match self {
            Turn::Started(s) | Turn::Played(s) | Turn::Finished(s) => s,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Turn::Finished(_))
    }
}

pub struct Engine {
    strategy: Box<dyn Strategy>,
    payoff_matrix: PayoffMatrix,
    moves_to_play: usize,
    timeout_secs: i64,
    clock: Box<dyn Clock>,
    store: Mutex<SessionStore>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("strategy", &self.strategy.describe())
            .field("payoff_matrix", &self.payoff_matrix)
            .field("moves_to_play", &self.moves_to_play)
            .field("timeout_secs", &self.timeout_secs)
            .field("active_sessions", &self.active_sessions())
            .finish()
    }
}

impl Engine {
    /// Build an engine playing the built-in strategy named in `config`.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let strategy = config.builtin_strategy()?;
        Self::with_strategy(config, strategy)
    }

    /// Build an engine playing `strategy`; `config.strategy` is ignored.
    pub fn with_strategy(
        config: &EngineConfig,
        strategy: impl Strategy + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let payoff_matrix = config.payoff_matrix()?;

        info!(
            strategy = strategy.describe(),
            ?payoff_matrix,
            moves_to_play = config.moves_to_play,
            timeout_secs = config.timeout_secs,
            "engine configured"
        );

        Ok(Self {
            strategy: Box::new(strategy),
            payoff_matrix,
            moves_to_play: config.moves_to_play as usize,
            timeout_secs: config.timeout_secs,
            clock: Box::new(SystemClock),
            store: Mutex::new(SessionStore::new()),
        })
    }

    /// Replace the time source used by `play_now` and `sweep_expired_now`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn moves_to_play(&self) -> usize {
        self.moves_to_play
    }

    pub fn timeout_secs(&self) -> i64 {
        self.timeout_secs
    }

    pub fn payoff_matrix(&self) -> PayoffMatrix {
        self.payoff_matrix
    }

    pub fn strategy_description(&self) -> &str {
        self.strategy.describe()
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Play one contact from `opponent` at time `now`.
    pub fn play(&self, opponent: &str, opponent_move: Move, now: Timestamp) -> Turn {
        let mut store = self.store.lock();

        let mut session = match store.delete(opponent) {
            Some(session) if !session.is_expired(now, self.timeout_secs) => session,
            stale => {
                match stale {
                    Some(old) => info!(
                        opponent,
                        rounds_played = old.rounds_played(),
                        idle_secs = old.idle_secs(now),
                        "session expired, starting over"
                    ),
                    None => info!(opponent, "new session"),
                }
                let fresh = Session::new(opponent, now);
                store.put(opponent, fresh.clone());
                return Turn::Started(fresh);
            }
        };

        let own_move = self.strategy.next_move(&session.moves);
        let points = self.payoff_matrix.payoff(own_move, opponent_move);
        session.record(own_move, opponent_move, points, now);

        debug!(
            opponent,
            round = session.rounds_played(),
            %own_move,
            %opponent_move,
            own_points = points.own,
            opponent_points = points.opponent,
            "round played"
        );

        if session.rounds_played() >= self.moves_to_play {
            info!(
                opponent,
                own_total = session.total_points.own,
                opponent_total = session.total_points.opponent,
                verdict = ?session.verdict(),
                "game finished"
            );
            Turn::Finished(session)
        } else {
            store.put(opponent, session.clone());
            Turn::Played(session)
        }
    }

    /// `play` at the engine clock's current time.
    pub fn play_now(&self, opponent: &str, opponent_move: Move) -> Turn {
        self.play(opponent, opponent_move, self.clock.now())
    }

    /// Whether `opponent` has a session in the store.
    ///
    /// Does not look at expiry: a stale session still counts until the next
    /// `play` or sweep replaces it.
    pub fn is_session_active(&self, opponent: &str) -> bool {
        self.store.lock().contains(opponent)
    }

    pub fn session(&self, opponent: &str) -> Option<Session> {
        self.store.lock().get(opponent).cloned()
    }

    pub fn active_sessions(&self) -> usize {
        self.store.lock().len()
    }

    /// Drop every session idle for longer than the timeout.
    ///
    /// Uses the same rule as lazy expiry in `play`, so running it never
    /// changes the outcome of any later call.
    pub fn sweep_expired(&self, now: Timestamp) -> usize {
        let removed = self.store.lock().remove_expired(now, self.timeout_secs);
        if !removed.is_empty() {
            warn!(count = removed.len(), opponents = ?removed, "swept expired sessions");
        }
        removed.len()
    }

    pub fn sweep_expired_now(&self) -> usize {
        self.sweep_expired(self.clock.now())
    }

    /// Point-in-time copy of every session.
    pub fn snapshot(&self) -> Snapshot {
        self.store.lock().snapshot_all()
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<(), PersistError> {
        let snapshot = self.snapshot();
        persistence::write_snapshot(&snapshot, writer)?;
        info!(sessions = snapshot.len(), "saved sessions");
        Ok(())
    }

    /// Replace the store with a saved snapshot. Returns the session count.
    ///
    /// Nothing changes when reading or decoding fails.
    pub fn load<R: Read>(&self, reader: R) -> Result<usize, PersistError> {
        let snapshot = persistence::read_snapshot(reader)?;
        Ok(self.install(snapshot))
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let snapshot = self.snapshot();
        persistence::write_snapshot_to_path(&snapshot, path)?;
        info!(sessions = snapshot.len(), path = %path.display(), "saved sessions");
        Ok(())
    }

    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<usize, PersistError> {
        let snapshot = persistence::read_snapshot_from_path(path.as_ref())?;
        Ok(self.install(snapshot))
    }

    fn install(&self, snapshot: Snapshot) -> usize {
        let count = snapshot.len();
        let mut store = self.store.lock();
        if !store.is_empty() {
            warn!(discarded = store.len(), "load replaces in-memory sessions");
        }
        store.replace_all(snapshot);
        info!(sessions = count, "loaded sessions");
        count
    }
}
