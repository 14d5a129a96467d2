// src/report/summary.rs
//
// Which reference matches the recording best, and when.

use serde::Serialize;

use super::series::{CovarianceRow, CovarianceSeries};
use crate::config::{Attack, REFERENCE_COUNT};

/// Reference with the largest covariance in a row.
///
/// Rows with non-finite values or no signal at all (every value zero) have
/// no best match. Ties go to the earlier reference.
pub fn best_match(row: &CovarianceRow) -> Option<Attack> {
    if row.iter().any(|v| !v.is_finite()) || row.iter().all(|&v| v == 0.0) {
        return None;
    }

    let mut best = 0;
    for j in 1..REFERENCE_COUNT {
        if row[j] > row[best] {
            best = j;
        }
    }
    Attack::from_index(best)
}

/// Per-reference statistics over the whole scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceStats {
    pub attack: Attack,
    /// Windows in which this reference had the largest covariance
    pub best_match_windows: usize,
    pub peak_covariance: f64,
    pub peak_time_secs: f64,
    pub mean_covariance: f64,
}

/// Summary of a covariance series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub windows: usize,
    pub undecided_windows: usize,
    pub references: Vec<ReferenceStats>,
}

impl MatchSummary {
    pub fn from_series(series: &CovarianceSeries) -> Self {
        let mut references: Vec<ReferenceStats> = Attack::ALL
            .iter()
            .map(|&attack| ReferenceStats {
                attack,
                best_match_windows: 0,
                peak_covariance: f64::NEG_INFINITY,
                peak_time_secs: 0.0,
                mean_covariance: 0.0,
            })
            .collect();

        let mut undecided = 0;
        let mut finite_counts = [0usize; REFERENCE_COUNT];

        for (k, row) in series.rows().iter().enumerate() {
            match best_match(row) {
                Some(attack) => references[attack.index()].best_match_windows += 1,
                None => undecided += 1,
            }

            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let stats = &mut references[j];
                finite_counts[j] += 1;
                stats.mean_covariance += value;
                if value > stats.peak_covariance {
                    stats.peak_covariance = value;
                    stats.peak_time_secs = series.time_at(k);
                }
            }
        }

        for (stats, &count) in references.iter_mut().zip(finite_counts.iter()) {
            if count > 0 {
                stats.mean_covariance /= count as f64;
            } else {
                stats.peak_covariance = 0.0;
            }
        }

        Self {
            windows: series.len(),
            undecided_windows: undecided,
            references,
        }
    }

    pub fn stats(&self, attack: Attack) -> &ReferenceStats {
        &self.references[attack.index()]
    }

    /// Reference that wins the most windows
    pub fn dominant(&self) -> Option<Attack> {
        self.references
            .iter()
            .filter(|s| s.best_match_windows > 0)
            .max_by(|a, b| {
                a.best_match_windows
                    .cmp(&b.best_match_windows)
                    .then_with(|| b.attack.cmp(&a.attack))
            })
            .map(|s| s.attack)
    }
}
