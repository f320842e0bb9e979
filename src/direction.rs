//! # Direction
//!
//! The four legal moves. `Direction::ALL` fixes the order in which the
//! predictor scans its estimates, which doubles as the tie-break order.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// One of the four legal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in scan order
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Position of this direction in `Direction::ALL`
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// The three directions other than `self`, in scan order
    pub fn others(self) -> [Direction; 3] {
        let mut out = [Direction::Up; 3];
        let mut n = 0;
        for d in Direction::ALL {
            if d != self {
                out[n] = d;
                n += 1;
            }
        }
        out
    }

    /// Picks uniformly among the three directions other than `self`
    pub fn random_other<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        let others = self.others();
        others[rng.random_range(0..others.len())]
    }

    /// Picks uniformly among all four directions
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Direction::ALL[rng.random_range(0..Direction::ALL.len())]
    }

    /// True for the directions whose lines are processed back to front
    pub(crate) fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// True when the move acts on columns rather than rows
    pub(crate) fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parses a direction from its name or first letter, ignoring case
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use mc2048::Direction;
    /// assert_eq!(Direction::from_str("left").unwrap(), Direction::Left);
    /// assert_eq!(Direction::from_str("U").unwrap(), Direction::Up);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}
