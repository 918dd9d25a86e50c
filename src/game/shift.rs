use crate::direction::Direction;
use crate::grid::{Grid, Pos};
use serde::{Deserialize, Serialize};

/// A merge event: the cell the merged tile ended up in and its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Merge {
    pub position: Pos,
    pub value: u32,
}

/// Result of sliding a grid in one direction. No randomness involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub grid: Grid,
    pub moved: bool,
    pub merges: Vec<Merge>,
}

impl Shift {
    /// Points earned by this shift: the sum of all merged tile values.
    pub fn score(&self) -> u64 {
        self.merges.iter().map(|m| m.value as u64).sum()
    }
}

/// Slide and merge every line of `grid` towards `dir`.
pub fn shift(grid: &Grid, dir: Direction) -> Shift {
    let mut next = grid.clone();
    let mut merges = Vec::new();
    let mut moved = false;
    for line in 0..grid.size() {
        moved |= compact_line(&mut next, dir, line, &mut merges);
    }
    Shift { grid: next, moved, merges }
}

/// True if at least one direction changes the grid.
pub fn has_moves(grid: &Grid) -> bool {
    Direction::ALL.iter().any(|&d| shift(grid, d).moved)
}

// Two cursors walk the line as if compacting left: `target` is the leftmost
// unresolved destination, `scan` the next tile to place. A destination that
// received a merge is closed, so a tile merges at most once per move.
fn compact_line(grid: &mut Grid, dir: Direction, line: usize, merges: &mut Vec<Merge>) -> bool {
    let n = grid.size();
    let mut moved = false;
    let mut target = 0usize;
    let mut scan = 1usize;
    while scan < n {
        if target == scan {
            scan += 1;
            if scan == n { break; }
        }
        let (fx, fy) = dir.transform(n, scan, line);
        let (tx, ty) = dir.transform(n, target, line);
        let Some(value) = grid.get(fx, fy) else {
            scan += 1;
            continue;
        };
        // 1 << 31 has no u32 double, so two of them never merge.
        match (grid.get(tx, ty), value.checked_mul(2)) {
            (None, _) => {
                let tile = grid.take(fx, fy);
                grid.set(tx, ty, tile);
                moved = true;
                scan += 1;
            }
            (Some(existing), Some(merged)) if existing == value => {
                grid.take(fx, fy);
                grid.set(tx, ty, Some(merged));
                merges.push(Merge { position: (tx, ty), value: merged });
                moved = true;
                scan += 1;
                target += 1;
            }
            (Some(_), _) => target += 1,
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_left(values: [u32; 4]) -> (Vec<u32>, Vec<Merge>, bool) {
        let mut rows = vec![vec![0u32; 4]; 4];
        rows[0] = values.to_vec();
        let g = Grid::from_rows(&rows).unwrap();
        let s = shift(&g, Direction::Left);
        (s.grid.rows()[0].clone(), s.merges, s.moved)
    }

    #[test]
    fn compacts_single_rows_left() {
        assert_eq!(row_left([0, 0, 0, 0]).0, vec![0, 0, 0, 0]);
        assert_eq!(row_left([0, 0, 0, 2]).0, vec![2, 0, 0, 0]);
        assert_eq!(row_left([2, 0, 2, 0]).0, vec![4, 0, 0, 0]);
        assert_eq!(row_left([2, 8, 8, 4]).0, vec![2, 16, 4, 0]);
        assert_eq!(row_left([2, 4, 8, 16]).0, vec![2, 4, 8, 16]);
        assert_eq!(row_left([2, 0, 0, 4]).0, vec![2, 4, 0, 0]);
        assert_eq!(row_left([2, 2, 2, 2]).0, vec![4, 4, 0, 0]);
        assert_eq!(row_left([4, 2, 2, 0]).0, vec![4, 4, 0, 0]);
        assert_eq!(row_left([2, 4, 0, 4]).0, vec![2, 8, 0, 0]);
    }

    #[test]
    fn merged_tile_is_not_merged_again() {
        let (row, merges, moved) = row_left([2, 2, 4, 0]);
        assert_eq!(row, vec![4, 4, 0, 0]);
        assert_eq!(merges, vec![Merge { position: (0, 0), value: 4 }]);
        assert!(moved);

        let (row, merges, _) = row_left([2, 0, 2, 2]);
        assert_eq!(row, vec![4, 2, 0, 0]);
        assert_eq!(merges.len(), 1);
    }

    #[test]
    fn packed_line_does_not_move() {
        let (row, merges, moved) = row_left([2, 4, 2, 4]);
        assert_eq!(row, vec![2, 4, 2, 4]);
        assert!(merges.is_empty());
        assert!(!moved);
    }

    #[test]
    fn merge_positions_follow_direction() {
        let g = Grid::from_rows(&[vec![0, 0, 0], vec![2, 0, 2], vec![0, 0, 0]]).unwrap();
        let s = shift(&g, Direction::Right);
        assert_eq!(s.merges, vec![Merge { position: (2, 1), value: 4 }]);
        assert_eq!(s.score(), 4);

        let g = Grid::from_rows(&[vec![0, 8, 0], vec![0, 0, 0], vec![0, 8, 0]]).unwrap();
        assert_eq!(shift(&g, Direction::Up).merges, vec![Merge { position: (1, 0), value: 16 }]);
        assert_eq!(shift(&g, Direction::Down).merges, vec![Merge { position: (1, 2), value: 16 }]);
    }

    #[test]
    fn largest_tiles_do_not_overflow() {
        let top = 1u32 << 31;
        let g = Grid::from_rows(&[vec![top, top], vec![0, 0]]).unwrap();
        let s = shift(&g, Direction::Left);
        assert!(!s.moved);
        assert!(s.merges.is_empty());
        assert_eq!(s.grid, g);

        let half = 1u32 << 30;
        let g = Grid::from_rows(&[vec![half, half], vec![0, 0]]).unwrap();
        let s = shift(&g, Direction::Left);
        assert_eq!(s.merges, vec![Merge { position: (0, 0), value: top }]);
        assert_eq!(s.score(), top as u64);
    }

    #[test]
    fn detects_remaining_moves() {
        let stuck = Grid::from_rows(&[vec![2, 4], vec![4, 2]]).unwrap();
        assert!(!has_moves(&stuck));
        let mergeable = Grid::from_rows(&[vec![2, 4], vec![2, 8]]).unwrap();
        assert!(has_moves(&mergeable));
        let gap = Grid::from_rows(&[vec![2, 0], vec![4, 8]]).unwrap();
        assert!(has_moves(&gap));
    }
}
