//! SpreadGame Core: market trajectories, friction, execution, AI and the game session.
//!
//! This crate contains the simulation behind the trading game:
//! - Domain types (market points, trajectories, accounts, trade records)
//! - Friction model with resilience-driven decay on a micro clock
//! - Trade execution with the non-negative wealth rule
//! - Contrarian AI policy and forced terminal liquidation
//! - `GameSession`, the owned state machine that drives one game
//! - Trajectory data: CSV loading, synthetic AR(1) generation, CSV export

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod rng;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public state types are Send + Sync so a session can
    /// move to a worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::MarketPoint>();
        require_sync::<domain::MarketPoint>();
        require_send::<domain::Trajectory>();
        require_sync::<domain::Trajectory>();
        require_send::<domain::Account>();
        require_sync::<domain::Account>();
        require_send::<domain::TradeRecord>();
        require_sync::<domain::TradeRecord>();
        require_send::<domain::TrajectoryId>();
        require_sync::<domain::TrajectoryId>();
        require_send::<domain::DatasetHash>();
        require_sync::<domain::DatasetHash>();

        // Engine types
        require_send::<engine::FrictionModel>();
        require_sync::<engine::FrictionModel>();
        require_send::<engine::AiPolicy>();
        require_sync::<engine::AiPolicy>();
        require_send::<engine::LiquidationController>();
        require_sync::<engine::LiquidationController>();
        require_send::<engine::SimulationClock>();
        require_sync::<engine::SimulationClock>();
        require_send::<engine::GameSession>();
        require_sync::<engine::GameSession>();
        require_send::<engine::SessionSnapshot>();
        require_sync::<engine::SessionSnapshot>();

        // Data and config
        require_send::<data::TrajectoryLibrary>();
        require_sync::<data::TrajectoryLibrary>();
        require_send::<data::GeneratorConfig>();
        require_sync::<data::GeneratorConfig>();
        require_send::<config::GameConfig>();
        require_sync::<config::GameConfig>();
        require_send::<rng::SeedHierarchy>();
        require_sync::<rng::SeedHierarchy>();
    }
}
