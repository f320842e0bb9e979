//! # Tile Spawner
//!
//! Places new tiles on empty cells. A spawned value is 2 nine times out of ten
//! and 4 otherwise.
//!
//! Spawning into a full grid is a contract violation and is reported as
//! `SpawnError::GridFull` instead of being silently dropped.

use crate::error::SpawnError;
use crate::grid::Grid;
use rand::Rng;

/// Draws the value of a newly spawned tile: 4 with probability 0.1, else 2
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.random::<f64>() * 10.0 > 9.0 {
        4
    } else {
        2
    }
}

/// Writes `value` into a uniformly chosen empty cell of a copy of `grid`
///
/// # Errors
/// Returns `SpawnError::GridFull` when there is no empty cell.
pub fn insert_at_random<R: Rng + ?Sized>(grid: &Grid, value: u32, rng: &mut R) -> Result<Grid, SpawnError> {
    let mut next = grid.clone();
    place_random(&mut next, value, rng)?;
    Ok(next)
}

/// In-place variant used where the caller already owns a fresh grid
pub(crate) fn place_random<R: Rng + ?Sized>(grid: &mut Grid, value: u32, rng: &mut R) -> Result<usize, SpawnError> {
    let empty = grid.empty_indices();
    if empty.is_empty() {
        return Err(SpawnError::GridFull);
    }
    let index = empty[rng.random_range(0..empty.len())];
    grid.set_at(index, value);
    Ok(index)
}

/// Spawns one tile with a randomly drawn value
pub fn spawn_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<Grid, SpawnError> {
    let value = random_tile_value(rng);
    insert_at_random(grid, value, rng)
}

/// An empty grid with two random tiles, the starting position of a game
///
/// # Errors
/// Fails for a zero size, or when the board has fewer than two cells.
pub fn initial_grid<R: Rng + ?Sized>(size: usize, rng: &mut R) -> crate::error::Result<Grid> {
    let mut grid = Grid::new(size)?;
    for _ in 0..2 {
        let value = random_tile_value(rng);
        place_random(&mut grid, value, rng)?;
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, GridError};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_insert_fills_exactly_one_empty_cell() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let grid = Grid::from_cells(2, vec![2, 0, 0, 4]).unwrap();
        let next = insert_at_random(&grid, 8, &mut rng).unwrap();

        assert_eq!(next.empty_indices().len(), 1);
        assert_eq!(next.tile_sum(), grid.tile_sum() + 8);
        assert_eq!(next.get_at(0), 2);
        assert_eq!(next.get_at(3), 4);
        // input untouched
        assert_eq!(grid.empty_indices(), vec![1, 2]);
    }

    #[test]
    fn test_insert_into_full_grid_fails() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let grid = Grid::from_cells(2, vec![2, 4, 8, 16]).unwrap();
        assert_eq!(insert_at_random(&grid, 2, &mut rng), Err(SpawnError::GridFull));
    }

    #[test]
    fn test_tile_values_are_mostly_twos() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let draws: Vec<u32> = (0..10_000).map(|_| random_tile_value(&mut rng)).collect();
        assert!(draws.iter().all(|&v| v == 2 || v == 4));
        let fours = draws.iter().filter(|&&v| v == 4).count();
        assert!(fours > 700 && fours < 1300, "fours = {}", fours);
    }

    #[test]
    fn test_initial_grid_has_two_tiles() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
        let grid = initial_grid(4, &mut rng).unwrap();
        assert_eq!(grid.cells().iter().filter(|&&v| v != 0).count(), 2);
    }

    #[test]
    fn test_initial_grid_too_small() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let grid = Grid::new(1).unwrap();
        assert!(spawn_tile(&grid, &mut rng).is_ok());
        assert!(matches!(initial_grid(1, &mut rng), Err(Error::Spawn(SpawnError::GridFull))));
        assert!(matches!(initial_grid(0, &mut rng), Err(Error::Grid(GridError::EmptySize))));
    }
}
