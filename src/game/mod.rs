//! The move engine: slide/merge, spawn and status transitions.
//!
//! `Engine` owns the configuration and the random source; `GameState` is a
//! plain value passed in and returned, so sessions can be replayed or run side
//! by side without shared state.

pub mod config;
pub mod shift;
pub mod spawn;
pub mod state;

use crate::direction::Direction;
use crate::error::Result;
use crate::grid::Grid;
use log::{debug, info, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub use config::{GameConfig, LossPolicy};
pub use shift::{has_moves, shift, Merge, Shift};
pub use spawn::{spawn, SpawnRule, Spawned};
pub use state::{GameState, MoveResult, Status};

pub struct Engine<R = SmallRng> {
    config: GameConfig,
    spawn_rule: SpawnRule,
    rng: R,
}

impl Engine<SmallRng> {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Deterministic engine: same seed and same directions give the same game.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let spawn_rule = config.spawn_rule()?;
        Ok(Self { config, spawn_rule, rng })
    }

    pub fn config(&self) -> &GameConfig { &self.config }

    /// Empty grid with two spawned tiles, score 0.
    pub fn new_game(&mut self) -> Result<GameState> {
        let mut grid = Grid::new(self.config.size)?;
        spawn(&mut grid, &self.spawn_rule, &mut self.rng)?;
        spawn(&mut grid, &self.spawn_rule, &mut self.rng)?;
        info!("new {0}x{0} game", self.config.size);
        Ok(GameState::from_grid(grid))
    }

    /// Apply one move. Moves on a finished game, and moves that change
    /// nothing, return the input state untouched and spawn nothing. Every
    /// other move spawns a tile, including the one that wins.
    pub fn play(&mut self, state: &GameState, dir: Direction) -> MoveResult {
        if state.status.is_terminal() {
            debug!("ignoring {dir}: game is {:?}", state.status);
            return MoveResult::unchanged(state);
        }
        let Shift { grid, moved, merges } = shift(&state.grid, dir);
        if !moved {
            debug!("{dir} changes nothing");
            return MoveResult::unchanged(state);
        }
        for m in &merges {
            trace!("merge at {:?} -> {}", m.position, m.value);
        }
        let gained: u64 = merges.iter().map(|m| m.value as u64).sum();
        let mut next = GameState {
            grid,
            score: state.score + gained,
            status: Status::InProgress,
            moves: state.moves + 1,
        };

        // Win is decided by the merges alone; a failed spawn cannot undo it.
        if merges.iter().any(|m| m.value >= self.config.win_tile) {
            next.status = Status::Won;
        }
        let spawned = match spawn(&mut next.grid, &self.spawn_rule, &mut self.rng) {
            Ok(s) => Some(s),
            Err(e) => {
                debug!("spawn failed: {e}");
                if next.status == Status::InProgress {
                    next.status = Status::Lost;
                }
                None
            }
        };
        if next.status == Status::InProgress
            && self.config.loss_policy == LossPolicy::NoMovesLeft
            && !has_moves(&next.grid)
        {
            next.status = Status::Lost;
        }

        debug!("{dir}: {} merges, +{gained}, score {}", merges.len(), next.score);
        if next.status.is_terminal() {
            info!("game {:?} after {} moves with score {}", next.status, next.moves, next.score);
        }
        let status = next.status;
        MoveResult { state: next, moved: true, merges, spawned, status }
    }

    /// Like `play` but takes raw input; unknown directions are an error and
    /// the caller keeps its state.
    pub fn play_input(&mut self, state: &GameState, input: &str) -> Result<MoveResult> {
        let dir: Direction = input.parse()?;
        Ok(self.play(state, dir))
    }
}

/// Start a default game of the given size with a fresh engine.
pub fn new_game(size: usize) -> Result<(Engine, GameState)> {
    let mut engine = Engine::new(GameConfig::with_size(size))?;
    let state = engine.new_game()?;
    Ok((engine, state))
}

pub fn status(state: &GameState) -> Status { state.status }

pub fn score(state: &GameState) -> u64 { state.score }
