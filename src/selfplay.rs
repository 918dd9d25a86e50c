use crate::direction::Direction;
use crate::error::Result;
use crate::game::{shift, Engine, GameConfig, GameState, Status};
use crate::grid::Grid;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_moves: usize,
    pub seed: u64,
    pub config: GameConfig,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 100, max_moves: 10_000, seed: 42, config: GameConfig::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub index: usize,
    /// Engine seed; replaying `moves` on an engine with this seed reproduces the game.
    pub seed: u64,
    pub moves: Vec<Direction>,
    pub score: u64,
    pub highest_tile: u32,
    pub status: Status,
    /// Still in progress but no direction changes the grid.
    pub stuck: bool,
}

pub fn game_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// A uniformly random direction among those that change the grid, or `None`
/// when the grid is locked.
pub fn random_move<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Direction> {
    let moving: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&d| shift(grid, d).moved)
        .collect();
    moving.choose(rng).copied()
}

/// Play one game to completion (or `max_moves`) with its own engine.
pub fn play_game(params: &SelfPlayParams, index: usize) -> Result<GameRecord> {
    let seed = game_seed(params.seed, index);
    let mut engine = Engine::seeded(params.config.clone(), seed)?;
    let mut move_rng = SmallRng::seed_from_u64(seed.rotate_left(13));
    let mut state = engine.new_game()?;
    let mut moves = Vec::new();
    let mut stuck = false;
    while state.status() == Status::InProgress && moves.len() < params.max_moves {
        let Some(dir) = random_move(state.grid(), &mut move_rng) else {
            stuck = true;
            break;
        };
        state = engine.play(&state, dir).state;
        moves.push(dir);
    }
    log::debug!(
        "game {index}: {:?} score {} after {} moves",
        state.status(),
        state.score(),
        moves.len()
    );
    Ok(GameRecord {
        index,
        seed,
        moves,
        score: state.score(),
        highest_tile: state.grid().highest_tile(),
        status: state.status(),
        stuck,
    })
}

/// Run `params.games` independent sessions in parallel on the current rayon pool.
pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>> {
    generate_games_with(params, |_| {})
}

/// Same as `generate_games`, calling `on_done` as each game finishes.
pub fn generate_games_with<F>(params: &SelfPlayParams, on_done: F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync,
{
    (0..params.games)
        .into_par_iter()
        .map(|i| -> Result<GameRecord> {
            let rec = play_game(params, i)?;
            on_done(&rec);
            Ok(rec)
        })
        .collect()
}

/// Re-run a recorded game and return its final state.
pub fn replay(config: &GameConfig, record: &GameRecord) -> Result<GameState> {
    let mut engine = Engine::seeded(config.clone(), record.seed)?;
    let mut state = engine.new_game()?;
    for &dir in &record.moves {
        state = engine.play(&state, dir).state;
    }
    Ok(state)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub won: usize,
    pub lost: usize,
    pub stuck: usize,
    pub mean_score: f64,
    pub max_score: u64,
    pub mean_moves: f64,
    /// Highest tile reached -> number of games.
    pub highest_tiles: BTreeMap<u32, usize>,
}

pub fn summarize(records: &[GameRecord]) -> Summary {
    let n = records.len();
    let mut highest_tiles = BTreeMap::new();
    for r in records {
        *highest_tiles.entry(r.highest_tile).or_insert(0) += 1;
    }
    let mean = |f: fn(&GameRecord) -> f64| {
        if n == 0 { 0.0 } else { records.iter().map(f).sum::<f64>() / n as f64 }
    };
    Summary {
        games: n,
        won: records.iter().filter(|r| r.status == Status::Won).count(),
        lost: records.iter().filter(|r| r.status == Status::Lost).count(),
        stuck: records.iter().filter(|r| r.stuck).count(),
        mean_score: mean(|r| r.score as f64),
        max_score: records.iter().map(|r| r.score).max().unwrap_or(0),
        mean_moves: mean(|r| r.moves.len() as f64),
        highest_tiles,
    }
}
