//! Trajectory data: CSV loading, synthetic generation, CSV export.
//!
//! Files use the long format: one row per `(trajectory_id, time)` with the
//! columns `trajectory_id,time,asset_price,depth,resilience`, optionally
//! preceded by `#` metadata lines.

pub mod generator;
pub mod library;
pub mod stats;
pub mod writer;

pub use generator::{
    column_stats, generate, into_library, GeneratedTrajectory, GeneratorConfig, GeneratorError, PRIMITIVE_FLOOR,
};
pub use library::{DataError, PrimitiveRow, TrajectoryLibrary};
pub use stats::SeriesStats;
pub use writer::{write_csv, write_csv_path};
