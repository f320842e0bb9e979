//! # Monte-Carlo Predictor
//!
//! Scores each of the four directions by averaging `attempts` randomized
//! rollouts that start with that direction, then picks the direction with the
//! highest average.
//!
//! ## Parallelism
//! One invocation is four independent jobs. Each job gets its own clone of the
//! grid and its own random stream, so the jobs share nothing mutable and only
//! meet again at the join barrier of the executor.
//!
//! ## Random streams
//! The predictor keeps a master `Xoshiro256PlusPlus`. Every invocation copies
//! it, hands out `jump()`-separated streams (one per direction plus one for the
//! zero-information fallback) and then `long_jump()`s the master. A seeded
//! predictor therefore makes the same decisions whichever executor runs it.
//!
//! ## Selection
//! The scan goes UP, DOWN, LEFT, RIGHT and only replaces the current best on a
//! strictly greater average, so on an exact tie the earlier direction wins.
//! When the best average is exactly 0 no direction carries information and one
//! of the four is chosen uniformly at random instead.

use crate::config::SearchConfig;
use crate::direction::Direction;
use crate::error::{ConfigError, Result};
use crate::executor::{default_executor, DefaultExecutor, Executor, SequentialExecutor};
use crate::grid::Grid;
use crate::rollout::simulate;
use log::{debug, trace, warn};
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::{Duration, Instant};

/// Averaged rollout score of one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalEstimate {
    pub direction: Direction,
    /// Mean accumulated points over all attempts
    pub average_points: f64,
    /// Number of rollouts behind the average
    pub attempts: usize,
}

/// Everything one predictor invocation produced
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The chosen direction
    pub direction: Direction,
    /// Estimates in `Direction::ALL` order
    pub estimates: [DirectionalEstimate; 4],
    /// True when every average was 0 and the choice was random
    pub random_fallback: bool,
    /// Wall-clock time of the invocation
    pub elapsed: Duration,
}

/// The Monte-Carlo move predictor
pub struct MonteCarlo<E: Executor = DefaultExecutor> {
    /// Maximum moves per rollout
    depth: usize,
    /// Rollouts per direction
    attempts: usize,
    /// Runs the four direction jobs
    executor: E,
    /// Master generator the per-invocation streams are derived from
    seed_source: Mutex<Xoshiro256PlusPlus>,
}

impl MonteCarlo<DefaultExecutor> {
    /// Creates a predictor on the default executor
    ///
    /// # Errors
    /// Fails on invalid settings or when the thread pool cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let executor = default_executor(config.threads)?;
        Ok(Self::with_executor(config, executor)?)
    }
}

impl<E: Executor> MonteCarlo<E> {
    /// Creates a predictor that dispatches through `executor`
    pub fn with_executor(config: &SearchConfig, executor: E) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let seed_source = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            depth: config.depth,
            attempts: config.attempts,
            executor,
            seed_source: Mutex::new(seed_source),
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Derives independent streams for one invocation and advances the master
    fn next_streams(&self) -> ([Xoshiro256PlusPlus; 4], Xoshiro256PlusPlus) {
        let mut master = self.seed_source.lock();
        let mut cursor = master.clone();
        master.long_jump();
        drop(master);

        let streams: [Xoshiro256PlusPlus; 4] = std::array::from_fn(|_| {
            cursor.jump();
            cursor.clone()
        });
        cursor.jump();
        (streams, cursor)
    }

    fn estimate_with(&self, grid: &Grid, streams: &[Xoshiro256PlusPlus; 4]) -> [DirectionalEstimate; 4] {
        let depth = self.depth;
        let attempts = self.attempts;

        self.executor.run_directions(|direction| {
            let branch = grid.clone();
            let mut rng = streams[direction.index()].clone();
            let total: u64 = (0..attempts)
                .map(|_| simulate(direction, &branch, depth, &mut rng).points)
                .sum();
            let average_points = total as f64 / attempts as f64;
            trace!("{}: {} rollouts, average {:.2}", direction, attempts, average_points);
            DirectionalEstimate {
                direction,
                average_points,
                attempts,
            }
        })
    }

    /// Runs `attempts` rollouts for every direction and averages them
    pub fn estimate(&self, grid: &Grid) -> [DirectionalEstimate; 4] {
        let (streams, _) = self.next_streams();
        self.estimate_with(grid, &streams)
    }

    /// Scores all four directions and picks one
    pub fn predict(&self, grid: &Grid) -> Prediction {
        let start = Instant::now();
        let (streams, mut fallback_rng) = self.next_streams();
        let estimates = self.estimate_with(grid, &streams);
        let (direction, random_fallback) = select_best(&estimates, &mut fallback_rng);
        let elapsed = start.elapsed();

        debug!(
            "estimates U={:.1} D={:.1} L={:.1} R={:.1} -> {}{} in {:?}",
            estimates[0].average_points,
            estimates[1].average_points,
            estimates[2].average_points,
            estimates[3].average_points,
            direction,
            if random_fallback { " (random fallback)" } else { "" },
            elapsed
        );

        Prediction {
            direction,
            estimates,
            random_fallback,
            elapsed,
        }
    }

    /// Picks the direction with the best averaged rollout score
    pub fn predict_best_move(&self, grid: &Grid) -> Direction {
        self.predict(grid).direction
    }
}

/// Chooses among the estimates
///
/// Returns the first strictly greatest average in scan order, or a uniformly
/// random estimate when that maximum is exactly 0. The flag reports whether the
/// random fallback was taken.
pub fn select_best<R: Rng + ?Sized>(estimates: &[DirectionalEstimate; 4], rng: &mut R) -> (Direction, bool) {
    let mut best = &estimates[0];
    for estimate in &estimates[1..] {
        if estimate.average_points > best.average_points {
            best = estimate;
        }
    }

    if best.average_points == 0.0 {
        let pick = &estimates[rng.random_range(0..estimates.len())];
        (pick.direction, true)
    } else {
        (best.direction, false)
    }
}

/// One-shot prediction with an entropy-seeded predictor
///
/// Uses the default executor and falls back to sequential dispatch if the
/// thread pool cannot be created.
///
/// # Errors
/// Only for `depth == 0` or `attempts == 0`.
pub fn predict_best_move(grid: &Grid, depth: usize, attempts: usize) -> std::result::Result<Direction, ConfigError> {
    let config = SearchConfig {
        depth,
        attempts,
        ..Default::default()
    };
    config.validate()?;

    match default_executor(config.threads) {
        Ok(executor) => Ok(MonteCarlo::with_executor(&config, executor)?.predict_best_move(grid)),
        Err(e) => {
            warn!("{}; running rollouts sequentially", e);
            Ok(MonteCarlo::with_executor(&config, SequentialExecutor)?.predict_best_move(grid))
        }
    }
}
