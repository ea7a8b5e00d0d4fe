//! Summary statistics for one primitive series.

use serde::Serialize;

/// Count, mean, population standard deviation and range of the finite values,
/// plus how many values were NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub non_finite: usize,
}

impl SeriesStats {
    /// Welford's running mean and variance, skipping non-finite values.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut non_finite = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for v in values {
            if !v.is_finite() {
                non_finite += 1;
                continue;
            }
            count += 1;
            let delta = v - mean;
            mean += delta / count as f64;
            m2 += delta * (v - mean);
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std_dev: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                non_finite,
            };
        }
        Self {
            count,
            mean,
            std_dev: (m2 / count as f64).sqrt(),
            min,
            max,
            non_finite,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_std_dev() {
        let s = SeriesStats::from_values([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.non_finite, 0);
    }

    #[test]
    fn non_finite_values_are_counted_not_used() {
        let s = SeriesStats::from_values([1.0, f64::NAN, 3.0, f64::INFINITY]);
        assert_eq!(s.count, 2);
        assert_eq!(s.non_finite, 2);
        assert!((s.mean - 2.0).abs() < 1e-12);
        assert_eq!(s.max, 3.0);
    }

    #[test]
    fn empty_series() {
        let s = SeriesStats::from_values(std::iter::empty());
        assert!(s.is_empty());
        assert!(s.mean.is_nan());
    }
}
