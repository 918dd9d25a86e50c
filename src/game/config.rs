use crate::error::{GameError, Result};
use crate::game::spawn::{SpawnRule, DEFAULT_FOUR_PROBABILITY};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When a game counts as lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LossPolicy {
    /// Lost only when a spawn finds no empty cell.
    #[default]
    BoardFull,
    /// Also lost as soon as no direction would change the grid.
    NoMovesLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub four_probability: f64,
    pub win_tile: u32,
    pub loss_policy: LossPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 4,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            win_tile: 2048,
            loss_policy: LossPolicy::BoardFull,
        }
    }
}

impl GameConfig {
    pub fn with_size(size: usize) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(GameError::InvalidGridSize(self.size));
        }
        if self.win_tile < 4 || !self.win_tile.is_power_of_two() {
            return Err(GameError::InvalidConfig(format!(
                "win_tile {} must be a power of two >= 4",
                self.win_tile
            )));
        }
        self.spawn_rule().map(|_| ())
    }

    pub fn spawn_rule(&self) -> Result<SpawnRule> {
        SpawnRule::new(self.four_probability)
    }

    /// Parse a (possibly partial) JSON config; missing fields keep defaults.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(s).context("parsing game config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("loading {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_classic_game() {
        let c = GameConfig::default();
        assert_eq!(c.size, 4);
        assert_eq!(c.win_tile, 2048);
        assert_eq!(c.four_probability, 0.1);
        assert_eq!(c.loss_policy, LossPolicy::BoardFull);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{"size": 5, "loss_policy": "no_moves_left"}"#;
        let c = GameConfig::from_json_str(json).unwrap();
        assert_eq!(c.size, 5);
        assert_eq!(c.win_tile, 2048);
        assert_eq!(c.loss_policy, LossPolicy::NoMovesLeft);
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert_eq!(GameConfig::with_size(1).validate(), Err(GameError::InvalidGridSize(1)));
        let c = GameConfig { win_tile: 1000, ..GameConfig::default() };
        assert!(matches!(c.validate(), Err(GameError::InvalidConfig(_))));
        let c = GameConfig { four_probability: 2.0, ..GameConfig::default() };
        assert!(matches!(c.validate(), Err(GameError::InvalidConfig(_))));
        assert!(GameConfig::from_json_str(r#"{"size": 0}"#).is_err());
    }
}
