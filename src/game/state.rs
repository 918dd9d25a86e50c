use crate::game::shift::Merge;
use crate::game::spawn::Spawned;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

impl Status {
    /// Won and Lost end the game; moves are ignored until a new game.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// One game session: the grid, the running score and the status.
///
/// States are values; the engine never mutates one in place, it returns the
/// next state inside a `MoveResult`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) score: u64,
    pub(crate) status: Status,
    pub(crate) moves: u32,
}

impl GameState {
    /// Start from an arbitrary grid, score 0 and in progress. Useful to set
    /// up positions; `Engine::new_game` is the normal entry point.
    pub fn from_grid(grid: Grid) -> Self {
        Self { grid, score: 0, status: Status::InProgress, moves: 0 }
    }

    /// Setup helper alongside `from_grid`: the same position with a given
    /// running score.
    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn score(&self) -> u64 { self.score }
    pub fn status(&self) -> Status { self.status }
    /// Number of moves that changed the grid.
    pub fn moves(&self) -> u32 { self.moves }
}

/// Everything a front-end needs to render one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub state: GameState,
    pub moved: bool,
    pub merges: Vec<Merge>,
    pub spawned: Option<Spawned>,
    pub status: Status,
}

impl MoveResult {
    pub(crate) fn unchanged(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            moved: false,
            merges: Vec::new(),
            spawned: None,
            status: state.status,
        }
    }

    /// Points earned by this move.
    pub fn gained(&self) -> u64 {
        self.merges.iter().map(|m| m.value as u64).sum()
    }
}
