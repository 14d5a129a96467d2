// src/core/dsp/filters.rs
//
// Anti-aliased decimation with linear-phase FIR filters.

use log::debug;

use super::firwin_lowpass;
use crate::error::{AnalysisError, Result};

/// Largest factor a single low-pass stage is trusted with
pub const MAX_SINGLE_PASS_FACTOR: u32 = 13;

/// Half filter length per unit of decimation factor
const HALF_TAPS_PER_FACTOR: usize = 10;

/// Sequence of per-pass decimation factors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimationPlan {
    passes: Vec<u32>,
}

impl DecimationPlan {
    /// Split a total factor into passes.
    ///
    /// Factors up to `MAX_SINGLE_PASS_FACTOR` run in one pass. Larger factors
    /// must be perfect squares and run as two passes of the square root.
    pub fn for_total(total: u32) -> Result<Self> {
        if total == 0 {
            return Err(AnalysisError::InvalidConfig(
                "decimation factor must be at least 1".to_string(),
            ));
        }
        if total <= MAX_SINGLE_PASS_FACTOR {
            return Ok(Self {
                passes: vec![total],
            });
        }

        let root = integer_sqrt(total);
        if root * root != total || root > MAX_SINGLE_PASS_FACTOR {
            return Err(AnalysisError::InvalidConfig(format!(
                "decimation factor {} cannot be split into two equal passes of at most {}",
                total, MAX_SINGLE_PASS_FACTOR
            )));
        }

        Ok(Self {
            passes: vec![root, root],
        })
    }

    pub fn passes(&self) -> &[u32] {
        &self.passes
    }

    pub fn total(&self) -> u32 {
        self.passes.iter().product()
    }

    /// Sample rate after all passes
    pub fn output_rate(&self, sample_rate: u32) -> u32 {
        sample_rate / self.total()
    }

    /// Run every pass over `samples`
    pub fn apply(&self, samples: &[f64], name: &str) -> Result<Vec<f64>> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptySignal {
                name: name.to_string(),
            });
        }

        let mut current = samples.to_vec();
        for &factor in &self.passes {
            let before = current.len();
            current = decimate_fir(&current, factor as usize);
            debug!("{}: decimated by {} ({} -> {} samples)", name, factor, before, current.len());
        }
        Ok(current)
    }
}

fn integer_sqrt(n: u32) -> u32 {
    let mut root = (n as f64).sqrt() as u32;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Zero-phase FIR decimation by an integer factor.
///
/// The low-pass filter has `20 * factor + 1` Hamming-windowed sinc taps with
/// its cutoff at `1 / factor` of Nyquist. Each output sample is the filter
/// centred on input sample `m * factor`, with zeros assumed outside the
/// signal, so the output has `ceil(len / factor)` samples and no delay.
pub fn decimate_fir(samples: &[f64], factor: usize) -> Vec<f64> {
    if factor <= 1 {
        return samples.to_vec();
    }

    let half = HALF_TAPS_PER_FACTOR * factor;
    let taps = firwin_lowpass(2 * half + 1, 1.0 / factor as f64);

    let n = samples.len();
    let out_len = n.div_ceil(factor);
    let mut output = Vec::with_capacity(out_len);

    for m in 0..out_len {
        // Input index for tap k is centre + half - k
        let centre = m * factor;
        let k_start = (centre + half).saturating_sub(n - 1);
        let k_end = (centre + half).min(taps.len() - 1);

        let acc: f64 = (k_start..=k_end)
            .map(|k| taps[k] * samples[centre + half - k])
            .sum();
        output.push(acc);
    }

    output
}
