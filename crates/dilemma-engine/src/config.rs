//! Engine configuration
//!
//! Read once at construction; the engine never re-reads it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::payoff::{PayoffMatrix, DEFAULT_PAYOFF_MATRIX};
use crate::strategy::BuiltinStrategy;

/// Rounds per game unless configured otherwise.
pub const DEFAULT_MOVES_TO_PLAY: u32 = 10;

/// Inactivity allowed before a session is discarded (2 days).
pub const DEFAULT_TIMEOUT_SECS: i64 = 2 * 86_400;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of a built-in strategy. Ignored by `Engine::with_strategy`.
    pub strategy: String,
    /// `[temptation, reward, punishment, sucker]`
    pub payoff_matrix: Vec<u32>,
    pub moves_to_play: u32,
    pub timeout_secs: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: BuiltinStrategy::default().name().to_string(),
            payoff_matrix: DEFAULT_PAYOFF_MATRIX.to_vec(),
            moves_to_play: DEFAULT_MOVES_TO_PLAY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn builtin_strategy(&self) -> Result<BuiltinStrategy, ConfigError> {
        self.strategy.parse()
    }

    pub fn payoff_matrix(&self) -> Result<PayoffMatrix, ConfigError> {
        PayoffMatrix::try_from(self.payoff_matrix.as_slice())
    }

    /// Check everything except the strategy name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.payoff_matrix()?;
        if self.moves_to_play == 0 {
            return Err(ConfigError::ZeroMovesToPlay);
        }
        if self.timeout_secs < 0 {
            return Err(ConfigError::NegativeTimeout(self.timeout_secs));
        }
        Ok(())
    }
}
