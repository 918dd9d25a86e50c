// 2048-style sliding tile engine
pub mod error;
pub mod direction;
pub mod grid;
pub mod game;
pub mod selfplay;

pub use direction::Direction;
pub use error::{GameError, Result};
pub use game::{Engine, GameConfig, GameState, MoveResult, Status};
pub use grid::Grid;
