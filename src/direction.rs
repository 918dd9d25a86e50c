use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector, x grows rightward and y downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Map a (column, row) position of a LEFT-compaction onto the real grid
    /// cell for this direction. `column` walks along a line starting at the
    /// edge tiles are pushed towards; `row` selects the line.
    #[inline]
    pub fn transform(self, n: usize, column: usize, row: usize) -> (usize, usize) {
        debug_assert!(column < n && row < n);
        match self {
            Direction::Left => (column, row),
            Direction::Right => (n - 1 - column, row),
            Direction::Down => (row, n - 1 - column),
            Direction::Up => (n - 1 - row, column),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts full names and wasd keys, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf).parse()
    }
}
