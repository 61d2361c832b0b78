// Sweep Report Types
// Structured output for per-size aggregation across repeated trials

use ring_balance::{RunResult, SimConfig};
use serde::Serialize;

// ─── Statistics (per-metric aggregation) ────────────────────────────────────

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: u64,
    pub max: u64,
    pub n: usize,
}

impl Stats {
    /// Summarise integer per-run counters (times, iterations, node counts).
    pub fn from_counts(samples: &[u64]) -> Self {
        let (Some(&min), Some(&max)) = (samples.iter().min(), samples.iter().max()) else {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0, max: 0, n: 0 };
        };
        let n = samples.len();
        let mean = samples.iter().map(|&x| x as u128).sum::<u128>() as f64 / n as f64;
        // Sample variance; a single run has no spread.
        let std_dev = match n {
            1 => 0.0,
            _ => {
                let squares: f64 = samples.iter().map(|&x| (x as f64 - mean).powi(2)).sum();
                (squares / (n - 1) as f64).sqrt()
            }
        };
        let half_width = Z_95 * std_dev / (n as f64).sqrt();
        Self {
            mean,
            std_dev,
            ci_lower: mean - half_width,
            ci_upper: mean + half_width,
            min,
            max,
            n,
        }
    }
}

// ─── Integer Averages (one CSV line per ring size) ──────────────────────────

/// Truncating integer means, matching the CSV summary format.
#[derive(Debug, Clone, Serialize)]
pub struct IntegerAverages {
    pub elapsed_time: u64,
    pub iterations: u64,
    pub total_load: u64,
    pub balanced_load: u64,
    pub unbalanced_nodes: u64,
    pub unbalanced_load: u64,
}

// ─── Per-Size Report ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub nodes: usize,
    pub n_runs: usize,
    pub converged_rate: f64,
    pub averages: IntegerAverages,
    pub elapsed_time: Stats,
    pub iterations: Stats,
    pub unbalanced_nodes: Stats,
    pub unbalanced_load: Stats,
    pub individual_runs: Vec<RunResult>,
}

impl SizeReport {
    /// `fraction, k, time, k, iterations, load, tolerance, unbalanced nodes, unbalanced load`
    pub fn csv_line(&self, balance_fraction: f64) -> String {
        let a = &self.averages;
        format!(
            "{:.6}, {}, {}, {}, {}, {}, {}, {}, {}",
            balance_fraction,
            self.nodes,
            a.elapsed_time,
            self.nodes,
            a.iterations,
            a.total_load,
            a.balanced_load,
            a.unbalanced_nodes,
            a.unbalanced_load,
        )
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub base_seed: u64,
    pub n_runs_per_size: usize,
    pub config: SimConfig,
    pub sizes: Vec<SizeReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_constant_counts() {
        let s = Stats::from_counts(&[4, 4, 4]);
        assert_eq!(s.mean, 4.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.ci_lower, s.ci_upper);
        assert_eq!((s.min, s.max, s.n), (4, 4, 3));
    }

    #[test]
    fn stats_of_spread_counts() {
        let s = Stats::from_counts(&[2, 4, 6]);
        assert_eq!(s.mean, 4.0);
        assert_eq!(s.std_dev, 2.0);
        assert!(s.ci_lower < 4.0 && s.ci_upper > 4.0);
        assert_eq!((s.min, s.max), (2, 6));
    }

    #[test]
    fn stats_of_huge_counts_do_not_overflow() {
        let s = Stats::from_counts(&[u64::MAX, u64::MAX]);
        assert_eq!(s.max, u64::MAX);
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn stats_of_no_counts() {
        assert_eq!(Stats::from_counts(&[]).n, 0);
    }

    #[test]
    fn csv_line_layout() {
        let report = SizeReport {
            nodes: 10,
            n_runs: 1,
            converged_rate: 1.0,
            averages: IntegerAverages {
                elapsed_time: 5000,
                iterations: 40,
                total_load: 2000,
                balanced_load: 1,
                unbalanced_nodes: 0,
                unbalanced_load: 0,
            },
            elapsed_time: Stats::from_counts(&[5000]),
            iterations: Stats::from_counts(&[40]),
            unbalanced_nodes: Stats::from_counts(&[0]),
            unbalanced_load: Stats::from_counts(&[0]),
            individual_runs: Vec::new(),
        };
        assert_eq!(report.csv_line(0.0001), "0.000100, 10, 5000, 10, 40, 2000, 1, 0, 0");
    }
}
