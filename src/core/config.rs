//! Session configuration.
//!
//! A session is configured at startup with:
//! - the board size `N` (default 5, at least 2)
//! - the number of episodes to play (default 1)
//! - the session seed every episode's random stream is derived from
//! - the worker thread count for parallel runs (default 1)
//! - which strategy plays each side
//!
//! Configs deserialize with `#[serde(default)]`, so a config file only needs
//! the fields it changes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest supported board size: every one of the `2 * N` pieces needs a
/// distinct `u32` id.
pub const MAX_BOARD_SIZE: usize = (u32::MAX / 2) as usize;

/// Smallest supported board size.
pub const MIN_BOARD_SIZE: usize = 2;

/// Check a board size against the supported range.
pub fn validate_board_size(size: usize) -> Result<()> {
    let cells_fit = size.checked_mul(size).is_some();
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) && cells_fit {
        Ok(())
    } else {
        Err(Error::InvalidBoardSize {
            size,
            max: MAX_BOARD_SIZE,
        })
    }
}

/// Selectable move-selection strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Uniform piece, then uniform destination.
    #[default]
    Random,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Random => write!(f, "random"),
        }
    }
}

/// Configuration for a session of episodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board dimension (rows = cols).
    pub board_size: usize,

    /// Number of episodes to play.
    pub episodes: usize,

    /// Session seed. Episode `i` uses `GameRng::new(seed).derive(i)`.
    pub seed: u64,

    /// Worker threads for `SessionRunner::run_parallel`.
    pub threads: usize,

    /// Strategy for player 1 (Attacker).
    pub attacker: StrategyKind,

    /// Strategy for player 2 (Defender).
    pub defender: StrategyKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            episodes: 1,
            seed: 0,
            threads: 1,
            attacker: StrategyKind::Random,
            defender: StrategyKind::Random,
        }
    }
}

impl SessionConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size.
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the episode count.
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Set the session seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the strategy for each side.
    pub fn with_strategies(mut self, attacker: StrategyKind, defender: StrategyKind) -> Self {
        self.attacker = attacker;
        self.defender = defender;
        self
    }

    /// Check the config for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        validate_board_size(self.board_size)?;
        if self.threads == 0 {
            return Err(Error::InvalidConfig {
                message: "threads must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
