use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position as (column, row), zero-indexed from the top-left.
pub type Pos = (usize, usize);

/// Square N x N board of optional power-of-two tiles.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<u32>>,
}

impl Grid {
    /// An empty `size` x `size` grid. Sizes below 2 cannot hold the two
    /// starting tiles and are rejected.
    pub fn new(size: usize) -> Result<Self> {
        if size < 2 {
            return Err(GameError::InvalidGridSize(size));
        }
        Ok(Self { size, cells: vec![None; size * size] })
    }

    /// Build a grid from rows of values where 0 means empty.
    ///
    /// ```
    /// use tileshift::grid::Grid;
    /// let g = Grid::from_rows(&[vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(g.get(1, 1), Some(4));
    /// ```
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self> {
        let n = rows.len();
        let mut grid = Self::new(n)?;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(GameError::NonSquareGrid { rows: n, row: y, len: row.len() });
            }
            for (x, &v) in row.iter().enumerate() {
                if v == 0 { continue; }
                if v < 2 || !v.is_power_of_two() {
                    return Err(GameError::InvalidTile(v));
                }
                grid.set(x, y, Some(v));
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize { self.size }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size, "cell ({x}, {y}) out of range");
        y * self.size + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: Option<u32>) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    /// Remove and return the tile at (x, y).
    #[inline]
    pub fn take(&mut self, x: usize, y: usize) -> Option<u32> {
        let i = self.index(x, y);
        self.cells[i].take()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| (i % self.size, i / self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    /// Highest tile on the board, 0 when empty.
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Rows top to bottom with 0 for empty cells.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.unwrap_or(0)).collect())
            .collect()
    }

    /// Iterate over (x, y, cell) in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Option<u32>)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &c)| (i % self.size, i / self.size, c))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.rows())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.highest_tile().max(2).to_string().len() + 2;
        let rule = "-".repeat((width + 1) * self.size - 1);
        for (y, row) in self.rows().iter().enumerate() {
            if y > 0 { writeln!(f, "{rule}")?; }
            let cells: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { " ".repeat(width) } else { format!("{v:^width$}") })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}
