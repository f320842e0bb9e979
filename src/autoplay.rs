//! # Auto Player
//!
//! The decision loop that lets the predictor play a session: fetch the current
//! grid, predict, apply, optionally pause, repeat until the move budget runs out
//! or the game is over.
//!
//! A predicted direction that turns out to be a no-op still uses up its turn;
//! the loop does not retry with another direction.

use crate::config::AutoPlayConfig;
use crate::direction::Direction;
use crate::executor::{DefaultExecutor, Executor};
use crate::predictor::MonteCarlo;
use crate::session::{GameSession, MoveResult};
use log::{debug, info};
use std::thread;
use std::time::{Duration, Instant};

/// What happened in one decision cycle
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Turn number (1-indexed)
    pub turn: u64,
    /// The predicted direction
    pub direction: Direction,
    /// What the session did with it
    pub result: MoveResult,
    /// Time spent predicting
    pub prediction_time: Duration,
    /// True when the predictor had no information and chose at random
    pub random_fallback: bool,
}

/// Outcome of a run of the decision loop
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    /// Final score of the session
    pub score: u64,
    /// Highest tile on the final grid
    pub max_tile: u32,
    /// Decision cycles run
    pub turns: u64,
    /// Cycles whose predicted direction did not change the grid
    pub noop_turns: u64,
    /// Whether the session ended in game over
    pub finished: bool,
    /// Mean wall-clock time per prediction
    pub mean_prediction_time: Duration,
    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}

/// Drives a session with a Monte-Carlo predictor
pub struct AutoPlayer<E: Executor = DefaultExecutor> {
    /// The predictor choosing each move
    predictor: MonteCarlo<E>,
    /// Move budget and pacing
    config: AutoPlayConfig,
}

impl<E: Executor> AutoPlayer<E> {
    pub fn new(predictor: MonteCarlo<E>, config: AutoPlayConfig) -> Self {
        Self { predictor, config }
    }

    pub fn predictor(&self) -> &MonteCarlo<E> {
        &self.predictor
    }

    /// Plays `session` until the budget is spent or the game is over
    ///
    /// # Arguments
    /// * `session` - The authoritative game to play
    /// * `on_turn` - Called after every decision with the turn report and session
    pub fn run<F>(&self, session: &mut GameSession, mut on_turn: F) -> GameSummary
    where
        F: FnMut(&TurnReport, &GameSession),
    {
        let start = Instant::now();
        let mut turns: u64 = 0;
        let mut noop_turns: u64 = 0;
        let mut prediction_total = Duration::ZERO;

        while !session.is_finished() {
            if let Some(budget) = self.config.moves {
                if turns >= budget {
                    break;
                }
            }

            let prediction = self.predictor.predict(session.grid());
            prediction_total += prediction.elapsed;
            turns += 1;

            let result = session.apply_direction(prediction.direction);
            if result == MoveResult::NoOp {
                noop_turns += 1;
                debug!("turn {}: {} did not move the grid", turns, prediction.direction);
            }

            let report = TurnReport {
                turn: turns,
                direction: prediction.direction,
                result,
                prediction_time: prediction.elapsed,
                random_fallback: prediction.random_fallback,
            };
            on_turn(&report, session);

            if !self.config.interval.is_zero() && !session.is_finished() {
                thread::sleep(self.config.interval);
            }
        }

        let mean_prediction_time = mean_duration(prediction_total, turns);

        let summary = GameSummary {
            score: session.score(),
            max_tile: session.grid().max_tile(),
            turns,
            noop_turns,
            finished: session.is_finished(),
            mean_prediction_time,
            elapsed: start.elapsed(),
        };
        info!(
            "played {} turns ({} no-op): score {}, best tile {}, {:?} per prediction",
            summary.turns, summary.noop_turns, summary.score, summary.max_tile, summary.mean_prediction_time
        );
        summary
    }
}

/// Mean of `count` durations summing to `total` (zero when `count` is 0)
fn mean_duration(total: Duration, count: u64) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    total.div_f64(count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::executor::SequentialExecutor;
    use crate::grid::Grid;

    fn player(moves: Option<u64>, seed: u64) -> AutoPlayer<SequentialExecutor> {
        let search = SearchConfig {
            depth: 5,
            attempts: 4,
            threads: 1,
            seed: Some(seed),
        };
        let predictor = MonteCarlo::with_executor(&search, SequentialExecutor).unwrap();
        AutoPlayer::new(
            predictor,
            AutoPlayConfig {
                moves,
                interval: Duration::ZERO,
            },
        )
    }

    #[test]
    fn test_respects_move_budget() {
        let mut session = GameSession::new(4, Some(10)).unwrap();
        let mut reports = Vec::new();
        let summary = player(Some(5), 1).run(&mut session, |report, _| reports.push(report.turn));

        assert_eq!(summary.turns, 5);
        assert_eq!(reports, vec![1, 2, 3, 4, 5]);
        assert_eq!(summary.score, session.score());
    }

    #[test]
    fn test_finished_session_runs_no_turns() {
        let grid = Grid::from_cells(2, vec![2, 4, 4, 2]).unwrap();
        let mut session = GameSession::from_grid(grid, Some(2));
        let summary = player(None, 2).run(&mut session, |_, _| panic!("no turn expected"));

        assert!(summary.finished);
        assert_eq!(summary.turns, 0);
        assert_eq!(summary.mean_prediction_time, Duration::ZERO);
    }

    #[test]
    fn test_plays_small_board_to_the_end() {
        let mut session = GameSession::new(2, Some(3)).unwrap();
        let summary = player(None, 3).run(&mut session, |_, _| {});

        assert!(summary.finished);
        assert!(session.is_finished());
        assert!(summary.turns >= session.move_count() as u64);
        assert_eq!(summary.turns - summary.noop_turns, session.move_count() as u64);
    }

    #[test]
    fn test_mean_duration_handles_huge_counts() {
        assert_eq!(mean_duration(Duration::from_secs(9), 0), Duration::ZERO);
        assert_eq!(mean_duration(Duration::from_millis(1500), 3), Duration::from_millis(500));

        let count = u32::MAX as u64 + 1;
        assert_eq!(mean_duration(Duration::from_secs(count), count), Duration::from_secs(1));
    }
}
