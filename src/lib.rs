//! # Parallel Monte-Carlo 2048
//!
//! A sliding-tile merge puzzle engine paired with a move predictor that plays
//! it through randomized rollouts.
//!
//! ## Layout
//! - [`grid`]: the N×N board value type
//! - [`engine`]: the transition function (`apply_move`) and terminal detector (`has_moves`)
//! - [`spawn`]: random tile placement
//! - [`rollout`]: a single randomized playout
//! - [`executor`]: sequential and thread-pool dispatch of the four direction jobs
//! - [`predictor`]: the Monte-Carlo predictor
//! - [`session`]: the authoritative game owner
//! - [`autoplay`]: the decision loop that lets the predictor play a session
//!
//! ## Quick start
//! ```
//! use mc2048::{GameSession, MonteCarlo, SearchConfig, SequentialExecutor};
//!
//! let mut session = GameSession::new(4, Some(42)).unwrap();
//! let config = SearchConfig { depth: 10, attempts: 5, threads: 1, seed: Some(42) };
//! let predictor = MonteCarlo::with_executor(&config, SequentialExecutor).unwrap();
//!
//! let direction = predictor.predict_best_move(session.grid());
//! session.apply_direction(direction);
//! assert!(session.score() <= 8);
//! ```

pub mod autoplay;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod executor;
pub mod grid;
pub mod predictor;
pub mod rollout;
pub mod session;
pub mod spawn;

pub use autoplay::{AutoPlayer, GameSummary, TurnReport};
pub use config::{AutoPlayConfig, GameConfig, SearchConfig};
pub use direction::Direction;
pub use engine::{apply_move, has_moves, MoveOutcome};
pub use error::{ConfigError, Error, ExecutorError, GridError, Result, SpawnError};
#[cfg(feature = "parallel")]
pub use executor::PoolExecutor;
pub use executor::{default_executor, DefaultExecutor, Executor, SequentialExecutor};
pub use grid::Grid;
pub use predictor::{predict_best_move, select_best, DirectionalEstimate, MonteCarlo, Prediction};
pub use rollout::{simulate, RolloutResult};
pub use session::{GameSession, GameState, MoveHistoryEntry, MoveResult};
pub use spawn::{initial_grid, insert_at_random, random_tile_value, spawn_tile};
