//! # Game Session - Authoritative Game State
//!
//! `GameSession` is the single owner of the real game: the grid, the score and
//! the finished flag. It ensures proper separation between:
//!
//! - **Authoritative state**: the grid owned here, changed only by `apply_direction`
//! - **Search states**: clones the predictor takes through `state()` or `grid()`
//! - **Render states**: snapshots handed to whatever displays the board
//!
//! ## Architecture Overview
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     GameSession                      │
//! │   grid · score · finished · history · spawn rng      │
//! └───────────────┬───────────────────────┬──────────────┘
//!                 │ apply_direction       │ state()
//!                 ▼                       ▼
//!        ┌─────────────────┐     ┌─────────────────┐
//!        │ input / autoplay│     │ predictor / UI  │
//!        └─────────────────┘     └─────────────────┘
//! ```

use crate::config::GameConfig;
use crate::direction::Direction;
use crate::engine::{apply_move, has_moves};
use crate::error::Result;
use crate::grid::Grid;
use crate::spawn::{initial_grid, place_random, random_tile_value};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::SystemTime;

/// Result of attempting to apply a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The grid changed and a new tile was spawned
    Applied {
        /// The applied direction
        direction: Direction,
        /// Points gained from merges
        score_delta: u64,
        /// Whether the game is now over
        finished: bool,
    },
    /// The direction did not change the grid; nothing was spawned
    NoOp,
    /// Game is already over, no more moves allowed
    GameOver,
}

impl MoveResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveResult::Applied { .. })
    }
}

/// A single entry in the move history
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry {
    /// When the move was made
    pub timestamp: SystemTime,
    /// Move number (1-indexed)
    pub move_number: usize,
    /// The direction that was applied
    pub direction: Direction,
    /// Points gained by the move
    pub score_delta: u64,
}

impl MoveHistoryEntry {
    /// Create a new move history entry
    pub fn new(move_number: usize, direction: Direction, score_delta: u64) -> Self {
        Self {
            timestamp: SystemTime::now(),
            move_number,
            direction,
            score_delta,
        }
    }
}

/// Read-only snapshot of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub grid: Grid,
    pub score: u64,
    pub is_finished: bool,
}

/// The owner of the authoritative game state
///
/// # Usage
/// ```
/// use mc2048::{Direction, GameSession, MoveResult};
/// let mut session = GameSession::new(4, Some(7)).unwrap();
///
/// match session.apply_direction(Direction::Left) {
///     MoveResult::Applied { score_delta, finished, .. } => {
///         // grid changed and a tile was spawned
///         let _ = (score_delta, finished);
///     }
///     MoveResult::NoOp => {
///         // nothing moved this turn
///     }
///     MoveResult::GameOver => unreachable!(),
/// }
///
/// // Snapshot for the predictor or a renderer
/// let state = session.state();
/// assert!(!state.is_finished);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    /// The authoritative grid
    grid: Grid,
    /// Total merge points so far
    score: u64,
    /// Set once no direction can change the grid
    finished: bool,
    /// Every applied move
    move_history: Vec<MoveHistoryEntry>,
    /// Generator for tile spawns
    rng: Xoshiro256PlusPlus,
}

fn spawn_rng(seed: Option<u64>) -> Xoshiro256PlusPlus {
    match seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
    }
}

impl GameSession {
    /// Starts a game on an empty `size`×`size` grid with two random tiles
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self> {
        let config = GameConfig { size, seed };
        Self::from_config(&config)
    }

    /// Starts a game from validated settings
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = spawn_rng(config.seed);
        let grid = initial_grid(config.size, &mut rng)?;
        Ok(Self::with_rng(grid, rng))
    }

    /// Continues play from a given grid
    ///
    /// The session starts finished if `grid` already has no moves.
    pub fn from_grid(grid: Grid, seed: Option<u64>) -> Self {
        Self::with_rng(grid, spawn_rng(seed))
    }

    fn with_rng(grid: Grid, rng: Xoshiro256PlusPlus) -> Self {
        let finished = !has_moves(&grid);
        Self {
            grid,
            score: 0,
            finished,
            move_history: Vec::new(),
            rng,
        }
    }

    /// Applies a direction to the authoritative grid
    ///
    /// Does nothing if the game is over or the move would not change the grid.
    /// Otherwise merges, spawns a tile, adds the merge points to the score and
    /// re-checks whether any move is left.
    pub fn apply_direction(&mut self, direction: Direction) -> MoveResult {
        if self.finished {
            return MoveResult::GameOver;
        }

        let outcome = apply_move(&self.grid, direction);
        if outcome.is_noop(&self.grid) {
            return MoveResult::NoOp;
        }

        self.grid = outcome.grid;
        let value = random_tile_value(&mut self.rng);
        if let Err(e) = place_random(&mut self.grid, value, &mut self.rng) {
            // Unreachable for a changed grid; keep the move and let has_moves decide.
            log::warn!("spawn skipped after {}: {}", direction, e);
        }

        self.score += outcome.score;
        self.finished = !has_moves(&self.grid);

        let move_number = self.move_history.len() + 1;
        self.move_history
            .push(MoveHistoryEntry::new(move_number, direction, outcome.score));

        MoveResult::Applied {
            direction,
            score_delta: outcome.score,
            finished: self.finished,
        }
    }

    /// Snapshot of grid, score and finished flag
    pub fn state(&self) -> GameState {
        GameState {
            grid: self.grid.clone(),
            score: self.score,
            is_finished: self.finished,
        }
    }

    /// Borrow the authoritative grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Get the complete move history
    pub fn history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    /// Get the number of applied moves
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Starts over on a fresh grid of the same size
    pub fn reset(&mut self, seed: Option<u64>) -> Result<()> {
        *self = Self::new(self.grid.size(), seed)?;
        Ok(())
    }

    /// Format the move history and result as plain text
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = String::from("=== Game History ===\n\n");
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} (+{})\n",
                entry.move_number, entry.direction, entry.score_delta
            ));
        }

        if self.finished {
            output.push_str(&format!(
                "\nResult: game over, score {}, best tile {}\n",
                self.score,
                self.grid.max_tile()
            ));
        } else {
            output.push_str(&format!("\n(Game in progress - score {})\n", self.score));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid4(cells: [u32; 16]) -> Grid {
        Grid::from_cells(4, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_new_game() {
        let session = GameSession::new(4, Some(1)).unwrap();
        let state = session.state();
        assert_eq!(state.score, 0);
        assert!(!state.is_finished);
        assert_eq!(state.grid.cells().iter().filter(|&&v| v != 0).count(), 2);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_rejects_tiny_board() {
        assert!(GameSession::new(1, None).is_err());
    }

    #[test]
    fn test_applied_move_spawns_and_scores() {
        let grid = grid4([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut session = GameSession::from_grid(grid, Some(3));

        let result = session.apply_direction(Direction::Left);
        assert_eq!(
            result,
            MoveResult::Applied {
                direction: Direction::Left,
                score_delta: 4,
                finished: false
            }
        );
        assert_eq!(session.score(), 4);
        assert_eq!(session.grid().get(0, 0), 4);
        assert_eq!(session.grid().cells().iter().filter(|&&v| v != 0).count(), 2);
        assert_eq!(session.history()[0].move_number, 1);
        assert_eq!(session.history()[0].score_delta, 4);
    }

    #[test]
    fn test_noop_move_changes_nothing() {
        let grid = grid4([2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut session = GameSession::from_grid(grid.clone(), Some(4));

        assert_eq!(session.apply_direction(Direction::Up), MoveResult::NoOp);
        assert_eq!(session.apply_direction(Direction::Left), MoveResult::NoOp);
        assert_eq!(*session.grid(), grid);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_locked_grid_is_game_over() {
        let grid = grid4([2, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2]);
        let mut session = GameSession::from_grid(grid, None);
        assert!(session.is_finished());
        assert_eq!(session.apply_direction(Direction::Down), MoveResult::GameOver);
    }

    #[test]
    fn test_reset() {
        let mut session = GameSession::new(4, Some(5)).unwrap();
        for d in Direction::ALL {
            session.apply_direction(d);
        }
        session.reset(Some(6)).unwrap();
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_format_history() {
        let grid = grid4([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut session = GameSession::from_grid(grid, Some(8));
        assert_eq!(session.format_history(), "No moves made yet.");

        session.apply_direction(Direction::Left);
        let history = session.format_history();
        assert!(history.contains("Game History"));
        assert!(history.contains("1. LEFT (+4)"));
        assert!(history.ends_with("(Game in progress - score 4)\n"));
    }

    #[test]
    fn test_format_history_of_finished_game() {
        // LEFT merges the pair and the spawn fills the only gap without a new pair.
        let grid = Grid::from_cells(2, vec![4, 4, 32, 8]).unwrap();
        let mut session = GameSession::from_grid(grid, Some(9));
        session.apply_direction(Direction::Left);
        assert!(session.is_finished());

        let history = session.format_history();
        assert_eq!(
            history,
            "=== Game History ===\n\n1. LEFT (+8)\n\nResult: game over, score 8, best tile 32\n"
        );
    }
}
