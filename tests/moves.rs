use pretty_assertions::assert_eq;
use tileshift::game::{shift, Merge};
use tileshift::{Direction, Grid};

fn grid(rows: &[[u32; 4]; 4]) -> Grid {
    let rows: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
    Grid::from_rows(&rows).unwrap()
}

#[test]
fn pair_then_four_merges_once() {
    let g = grid(&[[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
    let s = shift(&g, Direction::Left);
    assert!(s.moved);
    assert_eq!(s.grid.rows()[0], vec![4, 4, 0, 0]);
    assert_eq!(s.merges, vec![Merge { position: (0, 0), value: 4 }]);
    assert_eq!(s.score(), 4);
}

#[test]
fn trailing_tile_slides_but_does_not_merge_into_new_tile() {
    let g = grid(&[[2, 0, 2, 2], [0; 4], [0; 4], [0; 4]]);
    let s = shift(&g, Direction::Left);
    assert!(s.moved);
    assert_eq!(s.grid.rows()[0], vec![4, 2, 0, 0]);
    assert_eq!(s.merges.len(), 1);
    assert_eq!(s.merges[0].value, 4);
}

#[test]
fn whole_board_in_each_direction() {
    let g = grid(&[
        [2, 4, 8, 16],
        [2, 8, 8, 4],
        [4, 0, 0, 4],
        [2, 0, 0, 2],
    ]);
    assert_eq!(
        shift(&g, Direction::Left).grid.rows(),
        vec![vec![2, 4, 8, 16], vec![2, 16, 4, 0], vec![8, 0, 0, 0], vec![4, 0, 0, 0]]
    );
    assert_eq!(
        shift(&g, Direction::Right).grid.rows(),
        vec![vec![2, 4, 8, 16], vec![0, 2, 16, 4], vec![0, 0, 0, 8], vec![0, 0, 0, 4]]
    );
    assert_eq!(
        shift(&g, Direction::Up).grid.rows(),
        vec![vec![4, 4, 16, 16], vec![4, 8, 0, 8], vec![2, 0, 0, 2], vec![0, 0, 0, 0]]
    );
    assert_eq!(
        shift(&g, Direction::Down).grid.rows(),
        vec![vec![0, 0, 0, 0], vec![4, 0, 0, 16], vec![4, 4, 0, 8], vec![2, 8, 16, 2]]
    );
}

#[test]
fn locked_board_does_not_move_anywhere() {
    let g = grid(&[
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ]);
    for dir in Direction::ALL {
        let s = shift(&g, dir);
        assert!(!s.moved, "{dir} should not move");
        assert!(s.merges.is_empty());
        assert_eq!(s.grid, g);
    }
}

#[test]
fn already_compacted_direction_is_a_noop_while_others_move() {
    let g = grid(&[[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
    assert!(!shift(&g, Direction::Left).moved);
    assert!(!shift(&g, Direction::Up).moved);
    assert!(shift(&g, Direction::Right).moved);
    assert!(shift(&g, Direction::Down).moved);
}

#[test]
fn larger_grids_use_the_same_pass() {
    let rows = vec![
        vec![2, 2, 2, 2, 2],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
        vec![4, 0, 4, 0, 8],
    ];
    let g = Grid::from_rows(&rows).unwrap();
    let s = shift(&g, Direction::Left);
    assert_eq!(s.grid.rows()[0], vec![4, 4, 2, 0, 0]);
    assert_eq!(s.grid.rows()[4], vec![8, 8, 0, 0, 0]);
    assert_eq!(s.score(), 16);
}
