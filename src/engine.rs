//! # Transition Engine
//!
//! Deterministic move/merge logic and terminal-state detection.
//!
//! A move treats every row (LEFT/RIGHT) or column (UP/DOWN) as an independent
//! line. Lines are read in the direction of movement so the leading edge is
//! always index 0; for RIGHT and DOWN that means walking the line back to front
//! and writing it back the same way.

use crate::direction::Direction;
use crate::grid::Grid;
use tiles_shared::{board_has_adjacent_pair, merge_line};

/// Result of applying one direction to one grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The grid after shifting and merging (no tile spawned yet)
    pub grid: Grid,
    /// Sum of the values created by merges during this move
    pub score: u64,
}

impl MoveOutcome {
    /// Whether the move shifted or merged anything compared to `before`
    pub fn changed(&self, before: &Grid) -> bool {
        self.grid != *before
    }

    /// Whether the move left `before` untouched
    pub fn is_noop(&self, before: &Grid) -> bool {
        !self.changed(before)
    }
}

/// Flat indices of line `k` of a grid, ordered from the leading edge of `direction`
fn line_indices(size: usize, k: usize, direction: Direction, out: &mut Vec<usize>) {
    out.clear();
    if direction.is_vertical() {
        out.extend((0..size).map(|row| row * size + k));
    } else {
        out.extend((0..size).map(|col| k * size + col));
    }
    if direction.is_reversed() {
        out.reverse();
    }
}

/// Applies a direction to a grid
///
/// Pure: `grid` is left untouched and a new grid is returned along with the
/// merge score. Comparing the result to the input tells the caller whether a
/// tile should be spawned.
///
/// # Examples
/// ```
/// use mc2048::{apply_move, Direction, Grid};
/// let grid = Grid::from_cells(4, vec![0, 2, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
/// let outcome = apply_move(&grid, Direction::Left);
/// assert_eq!(&outcome.grid.cells()[..4], &[2, 4, 0, 0]);
/// assert_eq!(outcome.score, 0);
/// ```
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveOutcome {
    let size = grid.size();
    let mut next = grid.clone();
    let mut score = 0;

    let mut indices = Vec::with_capacity(size);
    let mut line = vec![0u32; size];

    for k in 0..size {
        line_indices(size, k, direction, &mut indices);
        for (slot, &idx) in line.iter_mut().zip(&indices) {
            *slot = grid.get_at(idx);
        }

        score += merge_line(&mut line);

        let cells = next.cells_mut();
        for (&value, &idx) in line.iter().zip(&indices) {
            cells[idx] = value;
        }
    }

    MoveOutcome { grid: next, score }
}

/// Returns true while at least one move can still change the grid
///
/// An empty cell is checked first as a cheap short-circuit; otherwise every
/// row and column is scanned for two adjacent equal tiles.
pub fn has_moves(grid: &Grid) -> bool {
    grid.has_empty_cell() || board_has_adjacent_pair(grid.cells(), grid.size())
}
