//! Simulation engine: friction, execution, AI, liquidation, clocks, session.
//!
//! Components, leaves first:
//!
//! 1. `friction`: per-participant zeta process
//! 2. `executor`: trade arithmetic and Rule A admission
//! 3. `policy`: contrarian AI decision rule
//! 4. `liquidation`: forced-unwind state machine
//! 5. `clock`: market clock and micro clock
//! 6. `session`: `GameSession`, composing all of the above

pub mod clock;
pub mod executor;
pub mod friction;
pub mod liquidation;
pub mod policy;
pub mod session;
pub mod snapshot;

pub use clock::SimulationClock;
pub use executor::TradeExecutor;
pub use friction::{FrictionModel, FrictionQuote, DEPTH_FLOOR};
pub use liquidation::{LiquidationController, LiquidationSchedule, Phase};
pub use policy::{AiParams, AiPolicy};
pub use session::{
    GameOverReason, GameSession, Lifecycle, RejectionReason, SessionError, StepReport,
    TradeDirection, TradeOutcome,
};
pub use snapshot::{AccountSnapshot, SessionSnapshot};
