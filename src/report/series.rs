// src/report/series.rs
//
// The scan result table: one row of six covariances per window position.

use serde::Serialize;

use crate::config::{Attack, REFERENCE_COUNT};

/// One covariance per reference, in `Attack::ALL` order
pub type CovarianceRow = [f64; REFERENCE_COUNT];

/// Covariance time series produced by the scanner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovarianceSeries {
    rows: Vec<CovarianceRow>,
    window_step: usize,
    sample_rate: u32,
    silent_windows: usize,
}

impl CovarianceSeries {
    pub fn new(
        rows: Vec<CovarianceRow>,
        window_step: usize,
        sample_rate: u32,
        silent_windows: usize,
    ) -> Self {
        Self {
            rows,
            window_step,
            sample_rate,
            silent_windows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CovarianceRow] {
        &self.rows
    }

    pub fn row(&self, k: usize) -> Option<&CovarianceRow> {
        self.rows.get(k)
    }

    /// Values of a single reference across all windows
    pub fn column(&self, attack: Attack) -> Vec<f64> {
        self.rows.iter().map(|r| r[attack.index()]).collect()
    }

    pub fn window_step(&self) -> usize {
        self.window_step
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Windows whose segment had no variance; their rows are zero
    pub fn silent_windows(&self) -> usize {
        self.silent_windows
    }

    /// Span of the time axis in seconds, `step * len / sample_rate`
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (self.window_step * self.rows.len()) as f64 / self.sample_rate as f64
    }

    /// Time of window `k`: evenly spaced from 0 to `duration_secs()` inclusive.
    ///
    /// This stretches `k * step / sample_rate` by `len / (len - 1)` so the
    /// last window sits exactly at `duration_secs()`.
    pub fn time_at(&self, k: usize) -> f64 {
        let n = self.rows.len();
        if n <= 1 {
            return 0.0;
        }
        k as f64 * self.duration_secs() / (n - 1) as f64
    }

    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.rows.len()).map(|k| self.time_at(k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_axis_spans_duration() {
        let series = CovarianceSeries::new(vec![[0.0; REFERENCE_COUNT]; 5], 2, 10, 0);
        assert!((series.duration_secs() - 1.0).abs() < 1e-12);

        let axis = series.time_axis();
        assert_eq!(axis.len(), 5);
        assert_eq!(axis[0], 0.0);
        assert!((axis[4] - 1.0).abs() < 1e-12);
        assert!((axis[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_time_axis_ends_on_duration_not_last_start() {
        // 4 windows, step 1, 4 Hz: starts at 0, 0.25, 0.5, 0.75 s, but the
        // axis spans 0..=1 s
        let series = CovarianceSeries::new(vec![[0.0; REFERENCE_COUNT]; 4], 1, 4, 0);
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        for (k, want) in expected.iter().enumerate() {
            assert!((series.time_at(k) - want).abs() < 1e-12, "k={}", k);
        }
        let start_of_last = 3.0 / 4.0;
        assert!(series.time_at(3) > start_of_last);
    }

    #[test]
    fn test_single_window_sits_at_zero() {
        let series = CovarianceSeries::new(vec![[0.0; REFERENCE_COUNT]], 3, 100, 0);
        assert_eq!(series.time_axis(), vec![0.0]);
        assert!((series.duration_secs() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_column_extraction() {
        let rows = vec![
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            [-1.0, -2.0, -3.0, -4.0, -5.0, -6.0],
        ];
        let series = CovarianceSeries::new(rows, 1, 441, 0);
        assert_eq!(series.column(Attack::MediumPunch), vec![3.0, -3.0]);
        assert_eq!(series.row(1).map(|r| r[5]), Some(-6.0));
        assert!(series.row(2).is_none());
    }

    #[test]
    fn test_empty_series() {
        let series = CovarianceSeries::new(Vec::new(), 1, 441, 0);
        assert!(series.is_empty());
        assert!(series.time_axis().is_empty());
        assert_eq!(series.duration_secs(), 0.0);
    }
}
