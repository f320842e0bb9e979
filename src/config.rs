//! # Configuration
//!
//! Settings for the predictor, the board and the decision loop. The binaries
//! fill these from their command-line arguments and validate them before a
//! game starts.

use crate::error::ConfigError;
use crate::grid::DEFAULT_SIZE;
use std::time::Duration;

/// Monte-Carlo search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of moves simulated per rollout
    pub depth: usize,
    /// Rollouts averaged per direction per decision
    pub attempts: usize,
    /// Worker threads for the rollout pool (0 = pick automatically)
    pub threads: usize,
    /// Seed for reproducible searches; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 30,
            attempts: 50,
            threads: 0,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

/// Board parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side length
    pub size: usize,
    /// Seed for tile spawns; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::GridTooSmall(self.size));
        }
        Ok(())
    }
}

/// Decision loop parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoPlayConfig {
    /// How many decisions to make; `None` plays until the game is over
    pub moves: Option<u64>,
    /// Pause between decisions
    pub interval: Duration,
}
