// src/core/dsp/stats.rs
//
// Statistical helpers: moments, normalization, covariance.

use crate::error::{AnalysisError, Result};

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divides by N)
pub fn population_std(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mu = mean(data);
    let var = data.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / data.len() as f64;
    var.sqrt()
}

/// Peak absolute amplitude
pub fn peak_amplitude(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0f64, f64::max)
}

/// Divide every sample by the sequence's standard deviation.
///
/// Samples are scaled, not centred. A constant or non-finite sequence is
/// rejected with `DegenerateSignal`.
pub fn normalize_std(samples: &mut [f64], name: &str) -> Result<()> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptySignal {
            name: name.to_string(),
        });
    }
    let sigma = population_std(samples);
    if !sigma.is_finite() || sigma <= f64::MIN_POSITIVE {
        return Err(AnalysisError::DegenerateSignal {
            name: name.to_string(),
        });
    }
    for s in samples.iter_mut() {
        *s /= sigma;
    }
    Ok(())
}

/// Biased sample covariance matrix, rows as variables
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl CovarianceMatrix {
    /// Compute the covariance of equally long rows, dividing by the row length.
    ///
    /// Returns `ShapeMismatch` if the rows differ in length.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let size = rows.len();
        let len = rows.first().map(|r| r.len()).unwrap_or(0);

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != len) {
            return Err(AnalysisError::ShapeMismatch {
                name: format!("row {}", i),
                expected: len,
                found: row.len(),
            });
        }
        if len == 0 {
            return Err(AnalysisError::EmptySignal {
                name: "covariance input".to_string(),
            });
        }

        let centred: Vec<Vec<f64>> = rows
            .iter()
            .map(|r| {
                let mu = mean(r);
                r.iter().map(|x| x - mu).collect()
            })
            .collect();

        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in i..size {
                let c = dot(&centred[i], &centred[j]) / len as f64;
                values[i * size + j] = c;
                values[j * size + i] = c;
            }
        }

        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
