use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a trajectory inside a dataset (the `trajectory_id` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrajectoryId(pub u32);

impl fmt::Display for TrajectoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "traj-{}", self.0)
    }
}

/// Deterministic content hash of a trajectory's market points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    pub fn from_hash(hash: &str) -> Self {
        Self(hash.to_string())
    }

    /// Hash a sequence of `(price, depth, resilience)` triples.
    ///
    /// Uses BLAKE3 over the little-endian bytes so the hash is stable across
    /// platforms and builds.
    pub fn of_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        let mut hasher = blake3::Hasher::new();
        for (price, depth, resilience) in points {
            hasher.update(&price.to_le_bytes());
            hasher.update(&depth.to_le_bytes());
            hasher.update(&resilience.to_le_bytes());
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
