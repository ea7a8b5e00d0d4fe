//! Deterministic seed hierarchy.
//!
//! A master seed expands into sub-seeds for each `(dataset, stream, index)`
//! tuple via BLAKE3. Derivation does not depend on call order, so game *n*
//! on a given dataset always sees the same randomness.

use crate::domain::DatasetHash;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Stream used to pick the trajectory for a game.
pub const SELECT_STREAM: &str = "select";
/// Stream used by scripted players.
pub const PLAYER_STREAM: &str = "player";

#[derive(Debug, Clone)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Sub-seed for `(dataset, stream, index)`.
    pub fn sub_seed(&self, dataset: &DatasetHash, stream: &str, index: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(dataset.0.as_bytes());
        hasher.update(&[0]);
        hasher.update(stream.as_bytes());
        hasher.update(&index.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn rng_for(&self, dataset: &DatasetHash, stream: &str, index: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(dataset, stream, index))
    }
}
