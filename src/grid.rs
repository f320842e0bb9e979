//! # Grid
//!
//! The N×N board of tile values. Cells are stored row-major in a flat vector;
//! rows and columns are derived views. Every cell is either 0 (empty) or a
//! power of two.
//!
//! Transitions never mutate a grid in place from the outside: the engine takes a
//! `&Grid` and hands back a new one, so each rollout branch owns its own chain of
//! grids and parallel branches never alias state.

use crate::error::GridError;
use std::fmt;

/// Default board side length
pub const DEFAULT_SIZE: usize = 4;

/// A square board of tiles
///
/// Equality is element-wise equality of the flat storage, which is exactly the
/// "did this move change anything" test the engine relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Board side length
    size: usize,
    /// Tile values, row-major
    cells: Vec<u32>,
}

impl Grid {
    /// Creates an all-empty grid of the given side length
    ///
    /// # Errors
    /// Returns `GridError::EmptySize` for a zero size.
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::EmptySize);
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Builds a grid from row-major cell values
    ///
    /// # Errors
    /// Fails fast on a zero size, a cell count other than `size * size`, or a
    /// non-empty cell that is not a power of two.
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::EmptySize);
        }
        if cells.len() != size * size {
            return Err(GridError::Dimension {
                expected: size * size,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, &v)| v != 0 && !v.is_power_of_two())
        {
            return Err(GridError::InvalidTile { index, value });
        }
        Ok(Self { size, cells })
    }

    /// Board side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat row-major cell storage
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Flat index of (row, col)
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[self.index(row, col)]
    }

    pub fn get_at(&self, index: usize) -> u32 {
        self.cells[index]
    }

    pub(crate) fn set_at(&mut self, index: usize, value: u32) {
        self.cells[index] = value;
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }

    /// Rows as contiguous slices, top to bottom
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }

    /// Columns, left to right; each is every N-th cell starting at its column
    pub fn columns(&self) -> Vec<Vec<u32>> {
        (0..self.size)
            .map(|col| self.cells.iter().skip(col).step_by(self.size).copied().collect())
            .collect()
    }

    /// Flat indices of all empty cells
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.contains(&0)
    }

    /// Highest tile on the board (0 for an empty board)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            cells: vec![0; DEFAULT_SIZE * DEFAULT_SIZE],
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for row in self.cells.chunks(self.size) {
            for (c, &cell) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                if cell == 0 {
                    write!(f, "{:>width$}", ".", width = width)?;
                } else {
                    write!(f, "{:>width$}", cell, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
