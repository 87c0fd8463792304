//! Error types for engine construction, persistence and the game archive
//!
//! `Engine::play` has no error path: every transition is total over a
//! well-typed move and any opponent identity.

use thiserror::Error;

/// Rejected engine configuration. Fatal: the engine is not constructed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),

    #[error("payoff matrix needs exactly 4 values, got {0}")]
    PayoffMatrixLength(usize),

    #[error("moves_to_play must be at least 1")]
    ZeroMovesToPlay,

    #[error("timeout must not be negative, got {0}s")]
    NegativeTimeout(i64),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while saving or loading a session snapshot.
///
/// A failed load never touches the in-memory store.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt snapshot: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot key `{key}` holds the session of `{opponent}`")]
    KeyMismatch { key: String, opponent: String },
}

/// Failure while appending to or reading the archive of finished games.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode archived game: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed archive line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
