//! Domain types for SpreadGame

pub mod account;
pub mod ids;
pub mod market;
pub mod trade;
pub mod trajectory;

pub use account::Account;
pub use ids::{DatasetHash, TrajectoryId};
pub use market::{MarketPoint, TrajectoryError};
pub use trade::{Participant, TradeKind, TradeRecord};
pub use trajectory::Trajectory;
