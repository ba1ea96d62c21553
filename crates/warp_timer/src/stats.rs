//! Benchmark statistics over a set of timing samples.

use serde::{Deserialize, Serialize};

/// Summary statistics of benchmark samples, all in the samples' unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    /// Number of samples.
    pub count: usize,
    pub mean: f64,
    /// Middle value, or the average of the two middle values for even counts.
    pub median: f64,
    /// First value of the longest run of equal values in sorted order.
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl BenchmarkStats {
    /// Computes statistics, or `None` when there are no samples.
    ///
    /// ```rust
    /// use warp_timer::BenchmarkStats;
    ///
    /// let stats = BenchmarkStats::from_samples(&[4.0, 1.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(stats.mean, 2.75);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.mode, 3.0);
    /// assert!(BenchmarkStats::from_samples(&[]).is_none());
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = sorted
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / n as f64;

        Some(Self {
            count: n,
            mean,
            median,
            mode: mode_of_sorted(&sorted),
            min: sorted[0],
            max: sorted[n - 1],
            std_dev: variance.sqrt(),
        })
    }

    /// Coefficient of variation (`std_dev / mean`), 0 for a zero mean.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean
        } else {
            0.0
        }
    }
}

/// Mode of a non-empty, sorted slice. Ties go to the smaller value.
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut mode = sorted[0];
    let mut best = 1usize;
    let mut run = 1usize;

    for pair in sorted.windows(2) {
        run = if pair[1] == pair[0] { run + 1 } else { 1 };
        if run > best {
            best = run;
            mode = pair[1];
        }
    }
    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_stats() {
        assert!(BenchmarkStats::from_samples(&[]).is_none());
    }

    #[test]
    fn single_sample() {
        let stats = BenchmarkStats::from_samples(&[5.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.mode, 5.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn odd_median() {
        let stats = BenchmarkStats::from_samples(&[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn even_median_averages_middle() {
        let stats = BenchmarkStats::from_samples(&[4.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
    }

    #[test]
    fn mode_is_longest_run() {
        let stats = BenchmarkStats::from_samples(&[2.0, 7.0, 7.0, 2.0, 7.0, 1.0]).unwrap();
        assert_eq!(stats.mode, 7.0);
    }

    #[test]
    fn mode_ties_take_smaller() {
        let stats = BenchmarkStats::from_samples(&[3.0, 3.0, 1.0, 1.0]).unwrap();
        assert_eq!(stats.mode, 1.0);
    }

    #[test]
    fn all_distinct_mode_is_minimum() {
        let stats = BenchmarkStats::from_samples(&[8.0, 2.0, 5.0]).unwrap();
        assert_eq!(stats.mode, 2.0);
    }

    #[test]
    fn population_std_dev() {
        let stats = BenchmarkStats::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.coefficient_of_variation(), 0.4);
    }

    #[test]
    fn zero_mean_cv() {
        let stats = BenchmarkStats::from_samples(&[0.0, 0.0]).unwrap();
        assert_eq!(stats.coefficient_of_variation(), 0.0);
    }
}
