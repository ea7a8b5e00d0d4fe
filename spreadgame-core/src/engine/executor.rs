//! Trade executor: cash/inventory arithmetic and the admission rule.
//!
//! Rule A: a trade is admitted only if the participant's wealth after the
//! trade (marked at the trade price, net of friction) is non-negative.
//! There are no partial fills; a failing trade is rejected entirely.

use crate::domain::Account;
use crate::engine::friction::FrictionQuote;

/// Stateless trade arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeExecutor;

impl TradeExecutor {
    /// Cash change of a fill: `-action * price - friction_cost`.
    pub fn execute(action: f64, price: f64, friction_cost: f64) -> f64 {
        -action * price - friction_cost
    }

    /// Mark-to-market wealth.
    pub fn wealth(cash: f64, inventory: f64, price: f64) -> f64 {
        cash + inventory * price
    }

    /// Wealth the participant would have right after the trade.
    pub fn post_trade_wealth(
        cash: f64,
        inventory: f64,
        action: f64,
        price: f64,
        friction_cost: f64,
    ) -> f64 {
        let cash_after = cash + Self::execute(action, price, friction_cost);
        Self::wealth(cash_after, inventory + action, price)
    }

    /// Rule A.
    pub fn validate(
        cash: f64,
        inventory: f64,
        action: f64,
        price: f64,
        friction_cost: f64,
    ) -> bool {
        Self::post_trade_wealth(cash, inventory, action, price, friction_cost) >= 0.0
    }

    /// Commit a priced fill to an account: cash, inventory, zeta, and wealth.
    ///
    /// Does not validate; callers decide whether Rule A applies.
    /// Returns the cash change.
    pub fn apply(account: &mut Account, action: f64, price: f64, quote: FrictionQuote) -> f64 {
        let cash_change = Self::execute(action, price, quote.cost);
        account.cash += cash_change;
        account.inventory += action;
        account.friction_mut().commit(quote);
        account.revalue(price);
        cash_change
    }
}
