//! Friction model: the zeta (spread) process.
//!
//! Each participant owns one model. Trading pushes zeta up by
//! `|action| / max(DEPTH_FLOOR, depth)`; resilience pulls it back toward zero:
//!
//! ```text
//! z_new = exp(-resilience * decay_scale) * z_prev + |action| / max(DEPTH_FLOOR, depth)
//! cost  = z_new * |action|
//! ```
//!
//! `decay_scale` is 1 for market-step and trade-triggered updates and
//! `1 / zeta_steps_per_market_step` for micro-step decay.

use serde::Serialize;

/// Lower bound applied to depth before dividing by it.
pub const DEPTH_FLOOR: f64 = 0.1;

/// Decay scale used by trades and ordinary market-step updates.
pub const FULL_DECAY: f64 = 1.0;

/// Result of pricing an action against the current zeta, before committing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionQuote {
    /// Zeta after the update.
    pub zeta: f64,
    /// Friction charged for the action.
    pub cost: f64,
}

/// Stateful per-participant friction process.
///
/// History is append-only and always starts at `0.0`. Only the last value
/// matters to the simulation; the rest is kept for inspection and charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrictionModel {
    history: Vec<f64>,
}

impl FrictionModel {
    pub fn new() -> Self {
        Self { history: vec![0.0] }
    }

    /// Current zeta.
    pub fn zeta(&self) -> f64 {
        self.history.last().copied().unwrap_or(0.0)
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Price an action without mutating state.
    pub fn preview(
        &self,
        action: f64,
        depth: f64,
        resilience: f64,
        decay_scale: f64,
    ) -> FrictionQuote {
        let size = action.abs();
        let decay = (-resilience * decay_scale).exp();
        let impact = size / depth.max(DEPTH_FLOOR);
        let zeta = decay * self.zeta() + impact;
        FrictionQuote {
            zeta,
            cost: zeta * size,
        }
    }

    /// Push a previously computed quote onto the history.
    pub fn commit(&mut self, quote: FrictionQuote) {
        self.history.push(quote.zeta);
    }

    /// Price and commit an action in one step. Returns the friction cost.
    pub fn step(&mut self, action: f64, depth: f64, resilience: f64, decay_scale: f64) -> f64 {
        let quote = self.preview(action, depth, resilience, decay_scale);
        self.commit(quote);
        quote.cost
    }

    /// Trade-triggered update with full decay. Returns the friction cost.
    pub fn cost(&mut self, action: f64, depth: f64, resilience: f64) -> f64 {
        self.step(action, depth, resilience, FULL_DECAY)
    }

    /// Decay-only step: no trade, no charge.
    pub fn decay(&mut self, resilience: f64, decay_scale: f64) {
        // depth is irrelevant when the action is zero
        self.step(0.0, 1.0, resilience, decay_scale);
    }

    /// Back to the single initial value.
    pub fn reset(&mut self) {
        self.history.clear();
        self.history.push(0.0);
    }
}

impl Default for FrictionModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let model = FrictionModel::new();
        assert_eq!(model.zeta(), 0.0);
        assert_eq!(model.history(), &[0.0]);
    }

    #[test]
    fn unit_buy_with_depth_five_and_no_resilience() {
        let mut model = FrictionModel::new();
        let cost = model.cost(1.0, 5.0, 0.0);
        assert!((model.zeta() - 0.2).abs() < 1e-12);
        assert!((cost - 0.2).abs() < 1e-12);
    }

    #[test]
    fn sell_costs_the_same_as_buy() {
        let mut buy = FrictionModel::new();
        let mut sell = FrictionModel::new();
        assert_eq!(buy.cost(2.0, 4.0, 0.5), sell.cost(-2.0, 4.0, 0.5));
    }

    #[test]
    fn depth_is_floored() {
        let mut model = FrictionModel::new();
        let cost = model.cost(1.0, 0.01, 0.0);
        // 1 / max(0.1, 0.01) = 10
        assert!((model.zeta() - 10.0).abs() < 1e-12);
        assert!((cost - 10.0).abs() < 1e-12);
    }

    #[test]
    fn consecutive_trades_accumulate() {
        let mut model = FrictionModel::new();
        model.cost(1.0, 5.0, 0.0);
        let cost = model.cost(1.0, 5.0, 0.0);
        // zeta = 0.2 + 0.2 = 0.4
        assert!((model.zeta() - 0.4).abs() < 1e-12);
        assert!((cost - 0.4).abs() < 1e-12);
    }

    #[test]
    fn decay_only_shrinks_zeta_without_charge() {
        let mut model = FrictionModel::new();
        model.cost(1.0, 5.0, 0.0);
        model.decay(1.0, 1.0);
        let expected = 0.2 * (-1.0_f64).exp();
        assert!((model.zeta() - expected).abs() < 1e-12);
        assert_eq!(model.history().len(), 3);
    }

    #[test]
    fn fractional_decay_compounds_to_full_decay() {
        let mut full = FrictionModel::new();
        let mut micro = FrictionModel::new();
        full.cost(1.0, 2.0, 0.0);
        micro.cost(1.0, 2.0, 0.0);

        full.decay(0.8, 1.0);
        for _ in 0..4 {
            micro.decay(0.8, 0.25);
        }
        assert!((full.zeta() - micro.zeta()).abs() < 1e-12);
    }

    #[test]
    fn preview_does_not_mutate() {
        let model = FrictionModel::new();
        let quote = model.preview(3.0, 5.0, 0.5, 1.0);
        assert!((quote.zeta - 0.6).abs() < 1e-12);
        assert!((quote.cost - 1.8).abs() < 1e-12);
        assert_eq!(model.history(), &[0.0]);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut model = FrictionModel::new();
        model.cost(1.0, 5.0, 0.0);
        model.decay(0.5, 1.0);
        model.reset();
        assert_eq!(model, FrictionModel::new());
    }
}
