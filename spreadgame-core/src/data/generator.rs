//! Synthetic primitives: zero-mean AR(1) processes shifted by offsets.
//!
//! Each trajectory has `terminal_time + 1` points starting at zero. Asset
//! price carries a linear drift whose sign is drawn once per trajectory.
//! Depth and resilience are floored after the offset so every generated
//! point satisfies the trajectory invariants.

use crate::data::library::{DataError, PrimitiveRow, TrajectoryLibrary};
use crate::data::stats::SeriesStats;
use crate::domain::{Trajectory, TrajectoryId};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Lower bound applied to generated depth and resilience.
pub const PRIMITIVE_FLOOR: f64 = 0.1;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to read generator config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse generator config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Generator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub n_trajectories: usize,
    pub terminal_time: usize,

    pub noise_scale_asset_price: f64,
    pub noise_scale_depth: f64,
    pub noise_scale_resilience: f64,

    /// Drift magnitude per step on the asset price.
    pub trend_slope: f64,
    /// Probability that a trajectory drifts upward.
    pub trend_probability: f64,

    /// Treat the simulated series as differences and integrate them.
    pub cumsum_asset_price: bool,
    pub cumsum_depth: bool,
    pub cumsum_resilience: bool,

    pub alpha_asset_price: f64,
    pub alpha_depth: f64,
    pub alpha_resilience: f64,

    pub offset_asset_price: f64,
    pub offset_depth: f64,
    pub offset_resilience: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_trajectories: 100,
            terminal_time: 800,
            noise_scale_asset_price: 0.3,
            noise_scale_depth: 0.2,
            noise_scale_resilience: 0.2,
            trend_slope: 0.005,
            trend_probability: 0.5,
            cumsum_asset_price: false,
            cumsum_depth: false,
            cumsum_resilience: false,
            alpha_asset_price: 0.95,
            alpha_depth: 0.95,
            alpha_resilience: 0.8,
            offset_asset_price: 0.0,
            offset_depth: 6.0,
            offset_resilience: 0.5,
        }
    }
}

impl GeneratorConfig {
    /// Load and validate generator parameters from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, GeneratorError> {
        let content = std::fs::read_to_string(path).map_err(|source| GeneratorError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate generator parameters. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, GeneratorError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.n_trajectories == 0 {
            return Err(invalid("n_trajectories", "at least 1"));
        }
        if self.terminal_time == 0 {
            return Err(invalid("terminal_time", "at least 1"));
        }
        for (field, value) in [
            ("noise_scale_asset_price", self.noise_scale_asset_price),
            ("noise_scale_depth", self.noise_scale_depth),
            ("noise_scale_resilience", self.noise_scale_resilience),
            ("trend_slope", self.trend_slope),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "finite and non-negative"));
            }
        }
        if !(0.0..=1.0).contains(&self.trend_probability) {
            return Err(invalid("trend_probability", "within [0, 1]"));
        }
        for (field, value) in [
            ("alpha_asset_price", self.alpha_asset_price),
            ("alpha_depth", self.alpha_depth),
            ("alpha_resilience", self.alpha_resilience),
            ("offset_asset_price", self.offset_asset_price),
            ("offset_depth", self.offset_depth),
            ("offset_resilience", self.offset_resilience),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "finite"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> GeneratorError {
    GeneratorError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

/// One generated trajectory, stored column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTrajectory {
    pub id: TrajectoryId,
    /// `+1.0` for an upward drift, `-1.0` for downward.
    pub trend_sign: f64,
    pub asset_price: Vec<f64>,
    pub depth: Vec<f64>,
    pub resilience: Vec<f64>,
}

impl GeneratedTrajectory {
    pub fn len(&self) -> usize {
        self.asset_price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asset_price.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = PrimitiveRow> + '_ {
        (0..self.len()).map(move |time| PrimitiveRow {
            trajectory_id: self.id.0,
            time,
            asset_price: self.asset_price[time],
            depth: self.depth[time],
            resilience: self.resilience[time],
        })
    }

    /// Convert to a validated trajectory with `price = base_price + asset_price`.
    pub fn to_trajectory(&self, base_price: f64) -> Result<Trajectory, DataError> {
        let triples: Vec<(f64, f64, f64)> = self
            .rows()
            .map(|r| (base_price + r.asset_price, r.depth, r.resilience))
            .collect();
        Trajectory::from_triples(self.id, &triples, base_price).map_err(|source| {
            DataError::Trajectory {
                id: self.id,
                source,
            }
        })
    }
}

/// Statistics of one column across all generated trajectories.
pub fn column_stats<F>(generated: &[GeneratedTrajectory], column: F) -> SeriesStats
where
    F: Fn(&GeneratedTrajectory) -> &[f64],
{
    SeriesStats::from_values(generated.iter().flat_map(|g| column(g).iter().copied()))
}

/// Simulate `n_trajectories` independent trajectories.
pub fn generate<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<GeneratedTrajectory>, GeneratorError> {
    config.validate()?;
    let trajectories: Vec<GeneratedTrajectory> = (0..config.n_trajectories)
        .map(|i| generate_one(config, TrajectoryId(i as u32), rng))
        .collect();
    debug!(
        trajectories = trajectories.len(),
        terminal_time = config.terminal_time,
        upward = trajectories.iter().filter(|t| t.trend_sign > 0.0).count(),
        "generated synthetic primitives"
    );
    Ok(trajectories)
}

fn generate_one<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    id: TrajectoryId,
    rng: &mut R,
) -> GeneratedTrajectory {
    let trend_sign = if rng.gen::<f64>() < config.trend_probability {
        1.0
    } else {
        -1.0
    };
    let drift = trend_sign * config.trend_slope;
    let n = config.terminal_time + 1;

    let mut asset_price = vec![0.0; n];
    let mut depth = vec![0.0; n];
    let mut resilience = vec![0.0; n];

    for t in 0..config.terminal_time {
        let z_ap: f64 = StandardNormal.sample(rng);
        let z_dp: f64 = StandardNormal.sample(rng);
        let z_re: f64 = StandardNormal.sample(rng);

        asset_price[t + 1] = config.alpha_asset_price * asset_price[t]
            + config.noise_scale_asset_price * z_ap
            + drift;
        depth[t + 1] = config.alpha_depth * depth[t] + config.noise_scale_depth * z_dp;
        resilience[t + 1] =
            config.alpha_resilience * resilience[t] + config.noise_scale_resilience * z_re;
    }

    if config.cumsum_asset_price {
        cumulative_sum(&mut asset_price);
    }
    if config.cumsum_depth {
        cumulative_sum(&mut depth);
    }
    if config.cumsum_resilience {
        cumulative_sum(&mut resilience);
    }

    for v in &mut asset_price {
        *v += config.offset_asset_price;
    }
    for v in &mut depth {
        *v = (*v + config.offset_depth).max(PRIMITIVE_FLOOR);
    }
    for v in &mut resilience {
        *v = (*v + config.offset_resilience).max(PRIMITIVE_FLOOR);
    }

    GeneratedTrajectory {
        id,
        trend_sign,
        asset_price,
        depth,
        resilience,
    }
}

fn cumulative_sum(values: &mut [f64]) {
    let mut acc = 0.0;
    for v in values.iter_mut() {
        acc += *v;
        *v = acc;
    }
}

/// Build a library directly from generated trajectories.
pub fn into_library(
    generated: &[GeneratedTrajectory],
    base_price: f64,
) -> Result<TrajectoryLibrary, DataError> {
    let trajectories = generated
        .iter()
        .map(|g| g.to_trajectory(base_price))
        .collect::<Result<Vec<_>, _>>()?;
    TrajectoryLibrary::from_trajectories(trajectories, base_price)
}
