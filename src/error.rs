//! # Error Types
//!
//! The engine is pure computation over well-formed inputs, so the taxonomy is
//! narrow: malformed grids are rejected at construction, spawning into a full
//! grid is a contract violation reported as an error, and bad settings are
//! caught before a game starts. Move prediction itself never fails.

/// Rejected grid construction
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size must be at least 1")]
    EmptySize,
    #[error("expected {expected} cells for the grid, got {actual}")]
    Dimension { expected: usize, actual: usize },
    #[error("cell {index} holds {value}, which is neither empty nor a power of two")]
    InvalidTile { index: usize, value: u32 },
}

/// Failure to place a new tile
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no empty cell left to spawn a tile into")]
    GridFull,
}

/// Invalid search or game settings
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rollout depth must be greater than zero")]
    ZeroDepth,
    #[error("attempts per direction must be greater than zero")]
    ZeroAttempts,
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
}

/// Failure to set up a parallel executor
#[derive(thiserror::Error, Debug)]
pub enum ExecutorError {
    #[error("failed to build rollout thread pool: {0}")]
    PoolBuild(String),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

pub type Result<T> = std::result::Result<T, Error>;
