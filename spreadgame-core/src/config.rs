//! Game configuration: the recognized options, loadable from TOML.
//!
//! Every field has a default, so an empty file (or `GameConfig::default()`)
//! yields a playable game. Sections:
//!
//! ```toml
//! terminal_time = 800
//! points_per_window = 5
//! zeta_steps_per_market_step = 4
//! min_micro_steps_between_trades = 1
//! liquidation_horizon = 0.8
//! initial_cash = 1000.0
//! initial_inventory = 0.0
//! player_trade_size = 1.0
//! base_price = 100.0
//!
//! [ai]
//! c0 = 1.0
//! depth_exponent = 2.0
//! action_threshold = 0.5
//! ```

use crate::engine::policy::AiParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Configuration for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Requested terminal time `T`. Clamped to the trajectory length at session start.
    pub terminal_time: usize,
    /// Market steps per AI decision window ("candle").
    pub points_per_window: usize,
    /// Micro steps per market step.
    pub zeta_steps_per_market_step: usize,
    /// Minimum micro steps between two player trades.
    pub min_micro_steps_between_trades: usize,
    /// Fraction of the horizon after which liquidation starts (0..=1).
    pub liquidation_horizon: f64,
    pub initial_cash: f64,
    pub initial_inventory: f64,
    /// Quantity of one player order.
    pub player_trade_size: f64,
    /// Baseline added to the asset-price deviation when loading trajectories.
    pub base_price: f64,
    pub ai: AiParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            terminal_time: 800,
            points_per_window: 5,
            zeta_steps_per_market_step: 4,
            min_micro_steps_between_trades: 1,
            liquidation_horizon: 0.8,
            initial_cash: 1000.0,
            initial_inventory: 0.0,
            player_trade_size: 1.0,
            base_price: 100.0,
            ai: AiParams::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal_time == 0 {
            return Err(ConfigError::invalid("terminal_time", "must be at least 1"));
        }
        if self.points_per_window == 0 {
            return Err(ConfigError::invalid("points_per_window", "must be at least 1"));
        }
        if self.zeta_steps_per_market_step == 0 {
            return Err(ConfigError::invalid(
                "zeta_steps_per_market_step",
                "must be at least 1",
            ));
        }
        if self.min_micro_steps_between_trades == 0 {
            return Err(ConfigError::invalid(
                "min_micro_steps_between_trades",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.liquidation_horizon) {
            return Err(ConfigError::invalid(
                "liquidation_horizon",
                format!("must be within 0..=1, got {}", self.liquidation_horizon),
            ));
        }
        if !self.initial_cash.is_finite() || self.initial_cash <= 0.0 {
            return Err(ConfigError::invalid(
                "initial_cash",
                format!("must be positive, got {}", self.initial_cash),
            ));
        }
        if !self.initial_inventory.is_finite() {
            return Err(ConfigError::invalid("initial_inventory", "must be finite"));
        }
        if !self.player_trade_size.is_finite() || self.player_trade_size <= 0.0 {
            return Err(ConfigError::invalid(
                "player_trade_size",
                format!("must be positive, got {}", self.player_trade_size),
            ));
        }
        if !self.base_price.is_finite() {
            return Err(ConfigError::invalid("base_price", "must be finite"));
        }
        let ai = &self.ai;
        if !ai.c0.is_finite() || !ai.depth_exponent.is_finite() {
            return Err(ConfigError::invalid("ai", "coefficients must be finite"));
        }
        if !ai.action_threshold.is_finite() || ai.action_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "ai.action_threshold",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config = GameConfig::from_toml(
            r#"
terminal_time = 200
liquidation_horizon = 0.5

[ai]
c0 = 3.0
"#,
        )
        .unwrap();
        assert_eq!(config.terminal_time, 200);
        assert_eq!(config.liquidation_horizon, 0.5);
        assert_eq!(config.ai.c0, 3.0);
        assert_eq!(config.ai.depth_exponent, 2.0);
        assert_eq!(config.zeta_steps_per_market_step, 4);
    }

    #[test]
    fn horizon_out_of_range_rejected() {
        let err = GameConfig::from_toml("liquidation_horizon = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "liquidation_horizon",
                ..
            }
        ));
    }

    #[test]
    fn zero_micro_steps_rejected() {
        let err = GameConfig::from_toml("zeta_steps_per_market_step = 0").unwrap_err();
        assert!(err.to_string().contains("zeta_steps_per_market_step"));
    }

    #[test]
    fn zero_trade_gap_rejected() {
        let err = GameConfig::from_toml("min_micro_steps_between_trades = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "min_micro_steps_between_trades",
                ..
            }
        ));
    }

    #[test]
    fn non_positive_cash_rejected() {
        assert!(GameConfig::from_toml("initial_cash = 0.0").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = GameConfig::from_toml("terminal_time = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "points_per_window = 10\n").unwrap();
        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.points_per_window, 10);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = GameConfig::from_file(Path::new("/nonexistent/game.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
