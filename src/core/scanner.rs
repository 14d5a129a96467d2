// src/core/scanner.rs
//
// Sliding-window covariance between the recording and the six references.

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use super::dsp::stats::{population_std, CovarianceMatrix};
use crate::config::{Attack, REFERENCE_COUNT};
use crate::error::{AnalysisError, Result};
use crate::report::{CovarianceRow, CovarianceSeries};

/// Number of windows for a recording: `floor((Lw - L) / step)`, 0 when `Lw <= L`
pub fn window_count(recording_len: usize, window_len: usize, step: usize) -> usize {
    if step == 0 {
        return 0;
    }
    recording_len.saturating_sub(window_len) / step
}

/// Covariance scanner over a fixed set of equally long references
pub struct CovarianceScanner<'a> {
    references: &'a [Vec<f64>; REFERENCE_COUNT],
    window_len: usize,
    step: usize,
}

impl<'a> CovarianceScanner<'a> {
    /// References must be non-empty and of identical length
    pub fn new(references: &'a [Vec<f64>; REFERENCE_COUNT], step: usize) -> Result<Self> {
        if step == 0 {
            return Err(AnalysisError::InvalidConfig(
                "window step must be at least 1".to_string(),
            ));
        }

        let window_len = references[0].len();
        if window_len == 0 {
            return Err(AnalysisError::EmptySignal {
                name: Attack::LightPunch.code().to_string(),
            });
        }
        for (attack, samples) in Attack::ALL.iter().zip(references.iter()) {
            if samples.len() != window_len {
                return Err(AnalysisError::ShapeMismatch {
                    name: attack.code().to_string(),
                    expected: window_len,
                    found: samples.len(),
                });
            }
        }

        Ok(Self {
            references,
            window_len,
            step,
        })
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Covariance matrix of a segment (row 0) stacked over the references (rows 1-6).
    ///
    /// The segment is scaled to unit standard deviation first. Returns `None`
    /// for a segment without variance.
    pub fn window_matrix(&self, segment: &[f64]) -> Result<Option<CovarianceMatrix>> {
        let sigma = population_std(segment);
        if !sigma.is_finite() || sigma <= f64::MIN_POSITIVE {
            return Ok(None);
        }
        let local: Vec<f64> = segment.iter().map(|s| s / sigma).collect();

        let mut rows: Vec<&[f64]> = Vec::with_capacity(REFERENCE_COUNT + 1);
        rows.push(&local);
        rows.extend(self.references.iter().map(|r| r.as_slice()));

        CovarianceMatrix::from_rows(&rows).map(Some)
    }

    /// Covariance of the window starting at `start` against each reference
    pub fn window_row(&self, recording: &[f64], start: usize) -> Result<Option<CovarianceRow>> {
        let end = start + self.window_len;
        let segment = recording
            .get(start..end)
            .ok_or_else(|| AnalysisError::ShapeMismatch {
                name: "recording window".to_string(),
                expected: end,
                found: recording.len(),
            })?;

        Ok(self.window_matrix(segment)?.map(|cov| {
            let mut row = [0.0; REFERENCE_COUNT];
            row.copy_from_slice(&cov.row(0)[1..=REFERENCE_COUNT]);
            row
        }))
    }

    /// Slide the window across the whole recording.
    ///
    /// Rows are computed in parallel into a pre-sized table, ordered by window
    /// position. Silent windows produce a zero row.
    pub fn scan(&self, recording: &[f64], sample_rate: u32, show_progress: bool) -> Result<CovarianceSeries> {
        let count = window_count(recording.len(), self.window_len, self.step);
        info!(
            "scanning {} window(s) of {} samples (step {})",
            count, self.window_len, self.step
        );

        let mut rows = vec![[0.0; REFERENCE_COUNT]; count];
        if count == 0 {
            return Ok(CovarianceSeries::new(rows, self.step, sample_rate, 0));
        }

        let progress = scan_progress_bar(count, show_progress);
        let silent = rows
            .par_iter_mut()
            .enumerate()
            .progress_with(progress.clone())
            .map(|(k, row)| -> Result<usize> {
                match self.window_row(recording, k * self.step)? {
                    Some(values) => {
                        *row = values;
                        Ok(0)
                    }
                    None => Ok(1),
                }
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))?;
        progress.finish_and_clear();

        if silent > 0 {
            debug!("{} silent window(s) left at zero covariance", silent);
        }

        Ok(CovarianceSeries::new(rows, self.step, sample_rate, silent))
    }
}

fn scan_progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} windows ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
    ProgressBar::new(len as u64).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dsp::stats::normalize_std;

    fn pseudo_noise(seed: u64, len: usize) -> Vec<f64> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5
            })
            .collect()
    }

    fn normalized_references(len: usize) -> [Vec<f64>; REFERENCE_COUNT] {
        let mut refs: [Vec<f64>; REFERENCE_COUNT] =
            std::array::from_fn(|i| pseudo_noise(i as u64 + 1, len));
        for r in refs.iter_mut() {
            normalize_std(r, "ref").unwrap();
        }
        refs
    }

    #[test]
    fn test_window_count() {
        assert_eq!(window_count(1000, 100, 1), 900);
        assert_eq!(window_count(1000, 100, 7), 128);
        assert_eq!(window_count(100, 100, 1), 0);
        assert_eq!(window_count(50, 100, 1), 0);
    }

    #[test]
    fn test_output_shape() {
        let refs = normalized_references(100);
        let mut recording = pseudo_noise(99, 1000);
        normalize_std(&mut recording, "whole").unwrap();

        let scanner = CovarianceScanner::new(&refs, 1).unwrap();
        let series = scanner.scan(&recording, 441, false).unwrap();
        assert_eq!(series.len(), 900);
        assert_eq!(series.rows()[0].len(), 6);
        assert_eq!(series.silent_windows(), 0);
    }

    #[test]
    fn test_equal_lengths_give_empty_table() {
        let refs = normalized_references(64);
        let recording = pseudo_noise(7, 64);

        let scanner = CovarianceScanner::new(&refs, 1).unwrap();
        let series = scanner.scan(&recording, 441, false).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_window_matrix_properties() {
        let refs = normalized_references(128);
        let recording = pseudo_noise(42, 400);
        let scanner = CovarianceScanner::new(&refs, 1).unwrap();

        let cov = scanner.window_matrix(&recording[10..138]).unwrap().unwrap();
        assert_eq!(cov.size(), 7);
        for i in 0..7 {
            // Unit variance for the local segment and every reference
            assert!((cov.get(i, i) - 1.0).abs() < 1e-9);
            for j in 0..7 {
                assert!((cov.get(i, j) - cov.get(j, i)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_embedded_reference_is_best_match() {
        let refs = normalized_references(32);
        let mut recording = pseudo_noise(1234, 200);
        recording[80..112].copy_from_slice(&refs[3]);

        let scanner = CovarianceScanner::new(&refs, 1).unwrap();
        let series = scanner.scan(&recording, 100, false).unwrap();
        let row = series.row(80).unwrap();

        // Same shape after local scaling: covariance equals variance
        assert!((row[3] - 1.0).abs() < 1e-9);
        for (j, &v) in row.iter().enumerate() {
            if j != 3 {
                assert!(v < row[3]);
            }
        }
    }

    #[test]
    fn test_local_renormalization_is_scale_invariant() {
        let refs = normalized_references(50);
        let base = pseudo_noise(5, 300);
        let loud: Vec<f64> = base.iter().map(|s| s * 40.0).collect();

        let scanner = CovarianceScanner::new(&refs, 3).unwrap();
        let quiet_series = scanner.scan(&base, 100, false).unwrap();
        let loud_series = scanner.scan(&loud, 100, false).unwrap();

        assert_eq!(quiet_series.len(), 83);
        for (a, b) in quiet_series.rows().iter().zip(loud_series.rows()) {
            for j in 0..REFERENCE_COUNT {
                assert!((a[j] - b[j]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_silent_window_yields_zero_row() {
        let refs = normalized_references(16);
        let mut recording = pseudo_noise(3, 64);
        for s in recording[20..40].iter_mut() {
            *s = 0.0;
        }

        let scanner = CovarianceScanner::new(&refs, 1).unwrap();
        let series = scanner.scan(&recording, 100, false).unwrap();
        // Windows starting at 20..=24 lie fully inside the silence
        assert_eq!(series.silent_windows(), 5);
        assert_eq!(series.row(22), Some(&[0.0; REFERENCE_COUNT]));
    }

    #[test]
    fn test_rejects_mismatched_references() {
        let mut refs = normalized_references(20);
        refs[4].push(0.0);
        match CovarianceScanner::new(&refs, 1) {
            Err(AnalysisError::ShapeMismatch { name, expected, found }) => {
                assert_eq!(name, "HP");
                assert_eq!(expected, 20);
                assert_eq!(found, 21);
            }
            _ => panic!("expected a shape mismatch"),
        }
    }

    #[test]
    fn test_rejects_zero_step() {
        let refs = normalized_references(20);
        assert!(matches!(
            CovarianceScanner::new(&refs, 0),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
