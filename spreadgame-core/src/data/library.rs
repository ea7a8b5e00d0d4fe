//! Trajectory library: every trajectory of a dataset, keyed by id.

use crate::domain::{DatasetHash, MarketPoint, Trajectory, TrajectoryError, TrajectoryId};
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from loading trajectory data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("trajectory {id}: {source}")]
    Trajectory {
        id: TrajectoryId,
        #[source]
        source: TrajectoryError,
    },

    #[error("dataset contains no trajectories")]
    Empty,

    #[error("unknown trajectory {0}")]
    UnknownTrajectory(TrajectoryId),
}

/// One CSV row in the long format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveRow {
    pub trajectory_id: u32,
    pub time: usize,
    /// Deviation from baseline, not the trading price.
    pub asset_price: f64,
    pub depth: f64,
    pub resilience: f64,
}

/// Immutable set of trajectories sharing one price baseline.
#[derive(Debug, Clone)]
pub struct TrajectoryLibrary {
    trajectories: BTreeMap<TrajectoryId, Arc<Trajectory>>,
    base_price: f64,
}

impl TrajectoryLibrary {
    /// Build from already validated trajectories.
    pub fn from_trajectories(
        trajectories: Vec<Trajectory>,
        base_price: f64,
    ) -> Result<Self, DataError> {
        if trajectories.is_empty() {
            return Err(DataError::Empty);
        }
        let trajectories = trajectories
            .into_iter()
            .map(|t| (t.id(), Arc::new(t)))
            .collect();
        Ok(Self {
            trajectories,
            base_price,
        })
    }

    /// Load a long-format CSV file. `price = base_price + asset_price`.
    pub fn from_csv_path(path: &Path, base_price: f64) -> Result<Self, DataError> {
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let library = Self::from_reader(file, base_price)?;
        debug!(
            path = %path.display(),
            trajectories = library.len(),
            "loaded trajectory library"
        );
        Ok(library)
    }

    /// Load long-format CSV from any reader. `#` lines are skipped.
    pub fn from_reader<R: Read>(reader: R, base_price: f64) -> Result<Self, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut grouped: BTreeMap<u32, Vec<PrimitiveRow>> = BTreeMap::new();
        for row in csv_reader.deserialize::<PrimitiveRow>() {
            let row = row?;
            grouped.entry(row.trajectory_id).or_default().push(row);
        }
        Self::from_rows(grouped, base_price)
    }

    fn from_rows(
        grouped: BTreeMap<u32, Vec<PrimitiveRow>>,
        base_price: f64,
    ) -> Result<Self, DataError> {
        let mut trajectories = Vec::with_capacity(grouped.len());
        for (raw_id, mut rows) in grouped {
            let id = TrajectoryId(raw_id);
            rows.sort_by_key(|r| r.time);
            let points = rows
                .iter()
                .map(|r| MarketPoint::new(r.time, base_price + r.asset_price, r.depth, r.resilience))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| DataError::Trajectory { id, source })?;
            let trajectory = Trajectory::new(id, points, base_price)
                .map_err(|source| DataError::Trajectory { id, source })?;
            trajectories.push(trajectory);
        }
        Self::from_trajectories(trajectories, base_price)
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TrajectoryId> + '_ {
        self.trajectories.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Trajectory>> {
        self.trajectories.values()
    }

    pub fn get(&self, id: TrajectoryId) -> Result<Arc<Trajectory>, DataError> {
        self.trajectories
            .get(&id)
            .cloned()
            .ok_or(DataError::UnknownTrajectory(id))
    }

    /// Uniformly random trajectory.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<Trajectory>> {
        self.trajectories.values().choose(rng).cloned()
    }

    /// Shortest `last_time()` across the library: the largest terminal time
    /// every trajectory can support.
    pub fn common_terminal_time(&self) -> usize {
        self.iter().map(|t| t.last_time()).min().unwrap_or(0)
    }

    /// Content hash over all trajectory hashes, in id order.
    pub fn fingerprint(&self) -> DatasetHash {
        let mut hasher = blake3::Hasher::new();
        for (id, trajectory) in &self.trajectories {
            hasher.update(&id.0.to_le_bytes());
            hasher.update(trajectory.hash().0.as_bytes());
        }
        DatasetHash(hasher.finalize().to_hex().to_string())
    }
}
