//! Read-only session view handed to the presentation layer each tick.

use crate::domain::{Account, DatasetHash, MarketPoint, TradeRecord, TrajectoryId};
use crate::engine::liquidation::Phase;
use crate::engine::session::{GameOverReason, Lifecycle};
use serde::Serialize;

/// Per-participant slice of a [`SessionSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    pub cash: f64,
    pub inventory: f64,
    pub wealth: f64,
    /// Wealth change since the start of the game.
    pub pnl: f64,
    pub zeta: f64,
    pub trades: Vec<TradeRecord>,
}

impl AccountSnapshot {
    pub fn capture(account: &Account, log: &[TradeRecord]) -> Self {
        Self {
            cash: account.cash,
            inventory: account.inventory,
            wealth: account.wealth(),
            pnl: account.pnl(),
            zeta: account.friction().zeta(),
            trades: log.to_vec(),
        }
    }

    /// Total friction paid across all fills.
    pub fn total_friction(&self) -> f64 {
        self.trades.iter().map(|t| t.friction_cost).sum()
    }
}

/// Everything a renderer needs, detached from the live session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub trajectory_id: TrajectoryId,
    pub dataset_hash: DatasetHash,
    pub time: usize,
    pub terminal_time: usize,
    pub micro_time: usize,
    pub market: MarketPoint,
    pub phase: Phase,
    pub in_liquidation: bool,
    pub lifecycle: Lifecycle,
    pub is_running: bool,
    pub game_over: Option<GameOverReason>,
    pub player: AccountSnapshot,
    pub ai: AccountSnapshot,
    pub warnings: Vec<String>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
