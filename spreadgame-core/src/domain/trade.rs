//! Trade records written to the per-participant logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participant {
    Player,
    Ai,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Player => write!(f, "player"),
            Participant::Ai => write!(f, "ai"),
        }
    }
}

/// What produced the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    /// Player-initiated order.
    Manual,
    /// AI policy decision.
    Policy,
    /// Forced unwind during the liquidation phase.
    Liquidation,
}

/// A committed fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Market time of the fill.
    pub time: usize,
    /// Micro-time of the fill.
    pub micro_time: usize,
    /// Signed quantity: positive buys, negative sells.
    pub action: f64,
    pub price: f64,
    pub friction_cost: f64,
    pub kind: TradeKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_snake_case() {
        let json = serde_json::to_string(&TradeKind::Liquidation).unwrap();
        assert_eq!(json, "\"liquidation\"");
        let json = serde_json::to_string(&Participant::Ai).unwrap();
        assert_eq!(json, "\"ai\"");
    }
}
