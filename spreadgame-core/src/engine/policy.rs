//! AI policy: contrarian unit-order rule.
//!
//! ```text
//! raw    = -c0 * deviation * (1 - 1/depth) ^ depth_exponent
//! action = sign(raw) if |raw| >= threshold else 0
//! ```
//!
//! The base `1 - 1/depth` is only well defined for `depth > 1`; below that the
//! policy stays out of the market.

use serde::{Deserialize, Serialize};

/// Coefficients of the contrarian rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiParams {
    pub c0: f64,
    pub depth_exponent: f64,
    pub action_threshold: f64,
}

impl Default for AiParams {
    fn default() -> Self {
        Self {
            c0: 1.0,
            depth_exponent: 2.0,
            action_threshold: 0.5,
        }
    }
}

/// Stateless decision rule. Returns `-1.0`, `0.0`, or `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiPolicy {
    params: AiParams,
}

impl AiPolicy {
    pub fn new(params: AiParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AiParams {
        &self.params
    }

    /// Unthresholded signal, or `None` when depth is too shallow.
    pub fn raw_signal(&self, price_deviation: f64, depth: f64) -> Option<f64> {
        if depth.is_nan() || depth <= 1.0 {
            return None;
        }
        let base = 1.0 - 1.0 / depth;
        let raw = -self.params.c0 * price_deviation * base.powf(self.params.depth_exponent);
        raw.is_finite().then_some(raw)
    }

    pub fn decide(&self, price_deviation: f64, depth: f64) -> f64 {
        match self.raw_signal(price_deviation, depth) {
            Some(raw) if raw != 0.0 && raw.abs() >= self.params.action_threshold => raw.signum(),
            _ => 0.0,
        }
    }
}

impl Default for AiPolicy {
    fn default() -> Self {
        Self::new(AiParams::default())
    }
}
