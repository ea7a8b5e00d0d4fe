//! Trajectory: immutable, contiguous sequence of market points.

use super::ids::{DatasetHash, TrajectoryId};
use super::market::{MarketPoint, TrajectoryError};
use serde::Serialize;

/// A full market path for one game, indexed by time `0..=last_time()`.
///
/// Built once and never mutated. All access goes through [`Trajectory::point`],
/// which reports out-of-range indexes as [`TrajectoryError::OutOfRange`].
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    id: TrajectoryId,
    points: Vec<MarketPoint>,
    /// Level the AI measures price deviation against.
    reference_price: f64,
    hash: DatasetHash,
}

impl Trajectory {
    /// Build a trajectory. Points must be non-empty and satisfy `points[i].time == i`.
    pub fn new(
        id: TrajectoryId,
        points: Vec<MarketPoint>,
        reference_price: f64,
    ) -> Result<Self, TrajectoryError> {
        if points.is_empty() {
            return Err(TrajectoryError::Empty);
        }
        for (expected, p) in points.iter().enumerate() {
            if p.time != expected {
                return Err(TrajectoryError::NonContiguous {
                    expected,
                    found: p.time,
                });
            }
        }
        if !reference_price.is_finite() {
            return Err(TrajectoryError::NonFinite {
                time: 0,
                field: "reference_price",
            });
        }
        let hash = DatasetHash::of_points(points.iter().map(|p| (p.price, p.depth, p.resilience)));
        Ok(Self {
            id,
            points,
            reference_price,
            hash,
        })
    }

    /// Build from `(price, depth, resilience)` triples; time is the position.
    pub fn from_triples(
        id: TrajectoryId,
        triples: &[(f64, f64, f64)],
        reference_price: f64,
    ) -> Result<Self, TrajectoryError> {
        let points = triples
            .iter()
            .enumerate()
            .map(|(t, &(price, depth, resilience))| MarketPoint::new(t, price, depth, resilience))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(id, points, reference_price)
    }

    pub fn id(&self) -> TrajectoryId {
        self.id
    }

    pub fn hash(&self) -> &DatasetHash {
        &self.hash
    }

    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    /// Last addressable time index (the longest terminal time this data supports).
    pub fn last_time(&self) -> usize {
        self.points.len() - 1
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, t: usize) -> Result<&MarketPoint, TrajectoryError> {
        self.points.get(t).ok_or(TrajectoryError::OutOfRange {
            index: t,
            last: self.last_time(),
        })
    }

    /// Price deviation from the reference level: the AI's input signal.
    pub fn price_deviation(&self, t: usize) -> Result<f64, TrajectoryError> {
        Ok(self.point(t)?.price - self.reference_price)
    }

    pub fn points(&self) -> &[MarketPoint] {
        &self.points
    }
}
