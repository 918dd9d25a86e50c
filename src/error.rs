use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("not a direction: {0:?} (expected up, down, left or right)")]
    InvalidDirection(String),

    /// Spawn found no empty cell. Turned into `Status::Lost` by the engine.
    #[error("board is full, no cell left to spawn into")]
    BoardFull,

    #[error("invalid grid size {0}: must be at least 2")]
    InvalidGridSize(usize),

    #[error("grid is not square: {rows} rows but row {row} has {len} cells")]
    NonSquareGrid { rows: usize, row: usize, len: usize },

    #[error("invalid tile value {0}: tiles are powers of two >= 2")]
    InvalidTile(u32),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
