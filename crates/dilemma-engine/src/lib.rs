//! Dilemma Engine
//!
//! Runs a bot that plays the iterated Prisoner's Dilemma against many
//! opponents at the same time, one match per opponent handle.
//!
//! The social-network client that feeds moves in and renders replies sits
//! outside this crate: it asks `Engine::is_session_active`, calls
//! `Engine::play`, and formats the returned `Turn`.

mod archive;
mod clock;
mod config;
mod engine;
mod error;
mod payoff;
mod persistence;
mod session;
mod store;
mod strategy;

pub use archive::{
    append_game, append_game_to_path, leaderboard, read_archive, read_archive_from_path, Standing,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, DEFAULT_MOVES_TO_PLAY, DEFAULT_TIMEOUT_SECS};
pub use engine::{Engine, Turn};
pub use error::{ArchiveError, ConfigError, PersistError};
pub use payoff::{payoff, PayoffMatrix, DEFAULT_PAYOFF_MATRIX};
pub use persistence::{read_snapshot, write_snapshot, Snapshot};
pub use session::{Points, Session, Timestamp, Verdict};
pub use store::SessionStore;
pub use strategy::{BuiltinStrategy, Move, Round, Strategy};
