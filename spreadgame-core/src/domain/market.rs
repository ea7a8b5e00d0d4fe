//! MarketPoint: one time step of the market primitives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input-data errors for market points and trajectories.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("non-finite {field} at time {time}")]
    NonFinite { time: usize, field: &'static str },

    #[error("depth must be > 0 (time {time}, depth {depth})")]
    NonPositiveDepth { time: usize, depth: f64 },

    #[error("resilience must be >= 0 (time {time}, resilience {resilience})")]
    NegativeResilience { time: usize, resilience: f64 },

    #[error("trajectory has no points")]
    Empty,

    #[error("trajectory is not contiguous: expected time {expected}, found {found}")]
    NonContiguous { expected: usize, found: usize },

    #[error("time {index} out of range (last time {last})")]
    OutOfRange { index: usize, last: usize },
}

/// Market observation at a single time step.
///
/// `price` is the trading price. `depth` is strictly positive and `resilience`
/// non-negative; both are enforced by [`MarketPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketPoint {
    pub time: usize,
    pub price: f64,
    pub depth: f64,
    pub resilience: f64,
}

impl MarketPoint {
    pub fn new(
        time: usize,
        price: f64,
        depth: f64,
        resilience: f64,
    ) -> Result<Self, TrajectoryError> {
        for (field, value) in [("price", price), ("depth", depth), ("resilience", resilience)] {
            if !value.is_finite() {
                return Err(TrajectoryError::NonFinite { time, field });
            }
        }
        if depth <= 0.0 {
            return Err(TrajectoryError::NonPositiveDepth { time, depth });
        }
        if resilience < 0.0 {
            return Err(TrajectoryError::NegativeResilience { time, resilience });
        }
        Ok(Self {
            time,
            price,
            depth,
            resilience,
        })
    }
}
