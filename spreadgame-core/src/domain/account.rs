//! Account: one participant's cash, inventory, and friction state.

use crate::engine::friction::FrictionModel;

/// Participant account.
///
/// `wealth` is the last mark-to-market value (`cash + inventory * price`);
/// it is refreshed by [`Account::mark`] and after every fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub cash: f64,
    pub inventory: f64,
    wealth: f64,
    friction: FrictionModel,
    wealth_history: Vec<f64>,
}

impl Account {
    pub fn new(initial_cash: f64, initial_inventory: f64, price: f64) -> Self {
        let wealth = initial_cash + initial_inventory * price;
        Self {
            cash: initial_cash,
            inventory: initial_inventory,
            wealth,
            friction: FrictionModel::new(),
            wealth_history: vec![wealth],
        }
    }

    pub fn wealth(&self) -> f64 {
        self.wealth
    }

    pub fn friction(&self) -> &FrictionModel {
        &self.friction
    }

    pub fn friction_mut(&mut self) -> &mut FrictionModel {
        &mut self.friction
    }

    /// Wealth recorded at each market step, starting with the initial value.
    pub fn wealth_history(&self) -> &[f64] {
        &self.wealth_history
    }

    /// Recompute wealth at `price` without recording it.
    pub fn revalue(&mut self, price: f64) -> f64 {
        self.wealth = self.cash + self.inventory * price;
        self.wealth
    }

    /// Mark to market at a new market step and record the value.
    pub fn mark(&mut self, price: f64) -> f64 {
        let wealth = self.revalue(price);
        self.wealth_history.push(wealth);
        wealth
    }

    /// Net change in wealth since the start of the game.
    pub fn pnl(&self) -> f64 {
        self.wealth - self.wealth_history.first().copied().unwrap_or(self.wealth)
    }
}
