//! Digital Signal Processing utilities

pub mod filters;
pub mod stats;

use std::f64::consts::PI;

/// Symmetric Hamming window, `0.54 - 0.46 cos(2 pi n / (N - 1))`
pub fn hamming(size: usize) -> Vec<f64> {
    if size <= 1 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / (size - 1) as f64).cos())
        .collect()
}

/// Normalized sinc, `sin(pi x) / (pi x)`
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Design a linear-phase low-pass FIR filter with a Hamming window.
///
/// `cutoff` is relative to Nyquist (0 < cutoff < 1). Taps are scaled so the
/// gain at DC is exactly 1. With an odd `num_taps` the response is symmetric
/// around the centre tap.
pub fn firwin_lowpass(num_taps: usize, cutoff: f64) -> Vec<f64> {
    if num_taps == 0 {
        return Vec::new();
    }

    let alpha = 0.5 * (num_taps - 1) as f64;
    let win = hamming(num_taps);

    let mut taps: Vec<f64> = win
        .iter()
        .enumerate()
        .map(|(n, &w)| cutoff * sinc(cutoff * (n as f64 - alpha)) * w)
        .collect();

    let dc_gain: f64 = taps.iter().sum();
    if dc_gain.abs() > 0.0 {
        for t in taps.iter_mut() {
            *t /= dc_gain;
        }
    }

    taps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_window() {
        let window = hamming(201);
        assert_eq!(window.len(), 201);
        assert!((window[0] - 0.08).abs() < 1e-12);
        assert!((window[100] - 1.0).abs() < 1e-12);
        assert!((window[200] - 0.08).abs() < 1e-12);
        assert_eq!(hamming(1), vec![1.0]);
        assert!(hamming(0).is_empty());
    }

    #[test]
    fn test_firwin_unit_dc_gain_and_symmetry() {
        let taps = firwin_lowpass(201, 0.1);
        assert_eq!(taps.len(), 201);

        let sum: f64 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);

        for i in 0..taps.len() {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-12);
        }

        // Centre tap is the largest
        let max = taps.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(max, taps[100]);
    }

    #[test]
    fn test_firwin_single_tap() {
        let taps = firwin_lowpass(1, 0.5);
        assert_eq!(taps, vec![1.0]);
    }
}
