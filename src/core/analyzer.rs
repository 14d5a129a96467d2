// src/core/analyzer.rs
//
// The full pipeline: load, decimate, align, normalize, scan.

use log::{info, warn};
use std::path::Path;

use super::align::{align_references, Trim};
use super::decoder::{load_signal, Signal};
use super::dsp::filters::DecimationPlan;
use super::dsp::stats::{normalize_std, peak_amplitude};
use super::scanner::{window_count, CovarianceScanner};
use super::visualization::{render_covariance_chart, ChartConfig};
use crate::config::{AnalysisConfig, Attack, REFERENCE_COUNT};
use crate::error::{AnalysisError, Result};
use crate::report::{CovarianceSeries, MatchSummary};

/// Everything the pipeline produces for one run
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub series: CovarianceSeries,
    pub summary: MatchSummary,
    /// Last `series.len()` recording samples scaled by the recording's peak
    pub envelope: Vec<f64>,
    /// Sample rate after decimation
    pub sample_rate: u32,
    /// Aligned reference length (L)
    pub reference_len: usize,
    /// Decimated recording length (Lw)
    pub recording_len: usize,
    pub trims: Vec<Trim>,
}

impl AnalysisOutcome {
    /// Draw the covariance chart to a PNG file
    pub fn render_chart(&self, output_path: &Path, config: &ChartConfig) -> Result<()> {
        render_covariance_chart(&self.series, &self.envelope, config, output_path)
    }
}

/// Runs the covariance pipeline with a fixed configuration
pub struct AttackAnalyzer {
    config: AnalysisConfig,
    plan: DecimationPlan,
}

impl AttackAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let plan = DecimationPlan::for_total(config.decimation_factor)?;
        Ok(Self { config, plan })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn plan(&self) -> &DecimationPlan {
        &self.plan
    }

    /// Load every file named by the configuration and run the pipeline
    pub fn run(&self) -> Result<AnalysisOutcome> {
        let mut references = Vec::with_capacity(REFERENCE_COUNT);
        for attack in Attack::ALL {
            let path = self.config.reference_path(attack);
            info!("loading {} from {}", attack, path.display());
            references.push(load_signal(&path)?);
        }
        let references: [Signal; REFERENCE_COUNT] = references
            .try_into()
            .map_err(|_| AnalysisError::InvalidConfig("expected six reference clips".to_string()))?;

        let recording_path = self.config.recording_path();
        info!("loading recording from {}", recording_path.display());
        let recording = load_signal(&recording_path)?;

        self.run_with_signals(references, recording)
    }

    /// Run the pipeline on signals already in memory
    pub fn run_with_signals(
        &self,
        references: [Signal; REFERENCE_COUNT],
        recording: Signal,
    ) -> Result<AnalysisOutcome> {
        let input_rate = recording.sample_rate;
        for (attack, signal) in Attack::ALL.iter().zip(references.iter()) {
            if signal.sample_rate != input_rate {
                warn!(
                    "{} is sampled at {} Hz but the recording at {} Hz; using the recording's rate",
                    attack, signal.sample_rate, input_rate
                );
            }
        }

        let sample_rate = self.plan.output_rate(input_rate);
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "decimation factor {} exceeds the sample rate of {} Hz",
                self.plan.total(),
                input_rate
            )));
        }

        info!(
            "decimating by {} in {} pass(es): {} Hz -> {} Hz",
            self.plan.total(),
            self.plan.passes().len(),
            input_rate,
            sample_rate
        );

        let mut decimated: Vec<Vec<f64>> = Vec::with_capacity(REFERENCE_COUNT);
        for (attack, signal) in Attack::ALL.iter().zip(references.iter()) {
            decimated.push(self.plan.apply(&signal.samples, attack.code())?);
        }
        let mut references: [Vec<f64>; REFERENCE_COUNT] = decimated
            .try_into()
            .map_err(|_| AnalysisError::InvalidConfig("expected six reference clips".to_string()))?;
        let mut recording = self.plan.apply(&recording.samples, "recording")?;

        let trims = align_references(&mut references)?;

        for (attack, samples) in Attack::ALL.iter().zip(references.iter_mut()) {
            normalize_std(samples, attack.code())?;
        }
        normalize_std(&mut recording, "recording")?;

        let reference_len = references[0].len();
        let recording_len = recording.len();
        if window_count(recording_len, reference_len, self.config.window_step) == 0 {
            return Err(AnalysisError::RecordingTooShort {
                recording: recording_len,
                reference: reference_len,
            });
        }

        let scanner = CovarianceScanner::new(&references, self.config.window_step)?;
        info!(
            "scanning {} samples with a {}-sample window, step {}",
            recording_len,
            scanner.window_len(),
            scanner.step()
        );
        let series = scanner.scan(&recording, sample_rate, self.config.show_progress)?;

        if series.silent_windows() > 0 {
            warn!(
                "{} of {} window(s) had no signal and were left at zero",
                series.silent_windows(),
                series.len()
            );
        }

        let envelope = trailing_envelope(&recording, series.len());
        let summary = MatchSummary::from_series(&series);

        Ok(AnalysisOutcome {
            series,
            summary,
            envelope,
            sample_rate,
            reference_len,
            recording_len,
            trims,
        })
    }
}

/// Last `count` samples divided by the peak absolute value of the whole signal
pub fn trailing_envelope(recording: &[f64], count: usize) -> Vec<f64> {
    let peak = peak_amplitude(recording);
    let start = recording.len().saturating_sub(count);
    recording[start..]
        .iter()
        .map(|s| if peak > 0.0 { s / peak } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn identity_analyzer() -> AttackAnalyzer {
        let config = ConfigBuilder::new()
            .decimation_factor(1)
            .show_progress(false)
            .build()
            .unwrap();
        AttackAnalyzer::new(config).unwrap()
    }

    fn signal(samples: &[f64]) -> Signal {
        Signal::new(samples.to_vec(), 100)
    }

    #[test]
    fn test_trailing_envelope() {
        let env = trailing_envelope(&[1.0, -4.0, 2.0, 3.0], 2);
        assert_eq!(env, vec![0.5, 0.75]);
        assert!(trailing_envelope(&[0.0, 0.0], 1).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_equal_lengths_are_too_short() {
        let analyzer = identity_analyzer();
        let references: [Signal; REFERENCE_COUNT] =
            std::array::from_fn(|i| signal(&[1.0, 2.0 + i as f64, 0.5, -1.0]));
        let recording = signal(&[0.3, 1.0, -2.0, 0.1]);

        match analyzer.run_with_signals(references, recording) {
            Err(AnalysisError::RecordingTooShort { recording, reference }) => {
                assert_eq!(recording, 4);
                assert_eq!(reference, 4);
            }
            other => panic!("unexpected result: {:?}", other.map(|o| o.series.len())),
        }
    }

    #[test]
    fn test_constant_reference_is_degenerate() {
        let analyzer = identity_analyzer();
        let mut references: [Signal; REFERENCE_COUNT] =
            std::array::from_fn(|i| signal(&[1.0, -1.0, 2.0 * i as f64 + 0.5, 0.0]));
        references[2] = signal(&[0.7; 4]);
        let recording = signal(&[0.3, 1.0, -2.0, 0.1, 0.9, -0.4, 0.2, 1.1]);

        match analyzer.run_with_signals(references, recording) {
            Err(AnalysisError::DegenerateSignal { name }) => assert_eq!(name, "MP"),
            other => panic!("unexpected result: {:?}", other.map(|o| o.series.len())),
        }
    }

    #[test]
    fn test_rate_below_factor_is_rejected() {
        let config = ConfigBuilder::new().show_progress(false).build().unwrap();
        let analyzer = AttackAnalyzer::new(config).unwrap();
        let references: [Signal; REFERENCE_COUNT] =
            std::array::from_fn(|_| Signal::new(vec![1.0, -1.0], 50));
        let recording = Signal::new(vec![1.0, -1.0, 0.5], 50);

        assert!(matches!(
            analyzer.run_with_signals(references, recording),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
