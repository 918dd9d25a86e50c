use crate::error::{GameError, Result};
use crate::grid::{Grid, Pos};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};

/// Chance that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// How new tiles are valued.
#[derive(Clone, Copy, Debug)]
pub struct SpawnRule {
    four_probability: f64,
    four: Bernoulli,
}

impl SpawnRule {
    pub fn new(four_probability: f64) -> Result<Self> {
        let four = Bernoulli::new(four_probability).map_err(|_| {
            let msg = format!("four_probability {four_probability} is not in [0, 1]");
            GameError::InvalidConfig(msg)
        })?;
        Ok(Self { four_probability, four })
    }

    pub fn four_probability(&self) -> f64 { self.four_probability }

    pub fn sample_value<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.four.sample(rng) { 4 } else { 2 }
    }
}

/// A tile placed by `spawn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spawned {
    pub position: Pos,
    pub value: u32,
}

/// Place one new tile on a uniformly chosen empty cell.
pub fn spawn<R: Rng + ?Sized>(grid: &mut Grid, rule: &SpawnRule, rng: &mut R) -> Result<Spawned> {
    let empty = grid.empty_cells();
    let &position = empty.choose(rng).ok_or(GameError::BoardFull)?;
    let value = rule.sample_value(rng);
    grid.set(position.0, position.1, Some(value));
    Ok(Spawned { position, value })
}
