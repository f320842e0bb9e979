//! # Rollout Simulator
//!
//! One randomized playout from a forced first direction. The playout is a
//! random walk over directions with no immediate repeats, spawning a tile after
//! every move that changes the board, for at most `depth` steps.

use crate::direction::Direction;
use crate::engine::{apply_move, has_moves};
use crate::grid::Grid;
use crate::spawn::{place_random, random_tile_value};
use rand::Rng;

/// Outcome of one simulated playout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutResult {
    /// The forced first direction of the playout
    pub direction: Direction,
    /// Merge score accumulated over the playout
    pub points: u64,
}

/// Plays one randomized sequence starting with `direction`
///
/// If the first move does not change `grid`, the playout is worthless and scores 0.
/// Later moves that change nothing are skipped without spawning or turning;
/// the playout stops early once the board has no moves left.
///
/// # Arguments
/// * `direction` - First move of the playout
/// * `grid` - Starting position; never modified
/// * `depth` - Maximum number of moves to simulate
/// * `rng` - Source for spawns and direction choices
pub fn simulate<R: Rng + ?Sized>(direction: Direction, grid: &Grid, depth: usize, rng: &mut R) -> RolloutResult {
    let mut current = grid.clone();
    let mut next_direction = direction;
    let mut points: u64 = 0;

    for step in 0..depth {
        let outcome = apply_move(&current, next_direction);

        if outcome.is_noop(&current) {
            if step == 0 {
                break;
            }
            // Neither grid nor direction changes, so every remaining step stalls too.
            continue;
        }

        current = outcome.grid;
        points += outcome.score;

        let value = random_tile_value(rng);
        // A changed board always has at least the cell a tile slid out of.
        if place_random(&mut current, value, rng).is_err() {
            break;
        }
        next_direction = next_direction.random_other(rng);

        if !has_moves(&current) {
            break;
        }
    }

    RolloutResult { direction, points }
}
