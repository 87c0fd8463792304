//! Subcommand implementations

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use dilemma_engine::{Engine, EngineConfig, Move, PersistError};
use tracing::info;

pub mod leaderboard;
pub mod play;
pub mod sessions;

/// Move as typed on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MoveArg {
    #[value(aliases = ["c", "C", "COOPERATE"])]
    Cooperate,
    #[value(aliases = ["d", "D", "DEFECT"])]
    Defect,
}

impl From<MoveArg> for Move {
    fn from(arg: MoveArg) -> Self {
        match arg {
            MoveArg::Cooperate => Move::Cooperate,
            MoveArg::Defect => Move::Defect,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Build the engine and restore the saved sessions. A missing snapshot
/// file means no games have been played yet.
fn open_engine(games: &Path, config: Option<&Path>) -> Result<Engine> {
    let config = load_config(config)?;
    let engine = Engine::new(&config).context("invalid engine configuration")?;

    match engine.load_from_path(games) {
        Ok(_) => {}
        Err(PersistError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            info!(path = %games.display(), "no saved sessions, starting empty");
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load sessions from {}", games.display()))
        }
    }
    Ok(engine)
}
