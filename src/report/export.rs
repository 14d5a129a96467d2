// src/report/export.rs
//
// JSON and CSV export of a finished analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::series::{CovarianceRow, CovarianceSeries};
use super::summary::MatchSummary;
use crate::config::{AnalysisConfig, Attack, REFERENCE_COUNT};
use crate::core::{AnalysisOutcome, Trim};
use crate::error::{AnalysisError, Result};

/// One window of the series, with its time
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub time_secs: f64,
    pub covariance: CovarianceRow,
}

/// Serializable report of a run
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub config: &'a AnalysisConfig,
    pub decimation_passes: &'a [u32],
    pub sample_rate: u32,
    /// Window advance in decimated samples
    pub window_step: usize,
    pub reference_len: usize,
    pub recording_len: usize,
    pub windows: usize,
    pub silent_windows: usize,
    pub columns: [&'static str; REFERENCE_COUNT],
    pub trims: &'a [Trim],
    pub summary: &'a MatchSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<SeriesPoint>>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(
        outcome: &'a AnalysisOutcome,
        config: &'a AnalysisConfig,
        decimation_passes: &'a [u32],
        include_series: bool,
    ) -> Self {
        let series = include_series.then(|| series_points(&outcome.series));
        Self {
            generated_at: Utc::now(),
            config,
            decimation_passes,
            sample_rate: outcome.series.sample_rate(),
            window_step: outcome.series.window_step(),
            reference_len: outcome.reference_len,
            recording_len: outcome.recording_len,
            windows: outcome.series.len(),
            silent_windows: outcome.series.silent_windows(),
            columns: Attack::ALL.map(|a| a.code()),
            trims: &outcome.trims,
            summary: &outcome.summary,
            series,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let export_err = |source: std::io::Error| AnalysisError::Export {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(export_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| export_err(e.into()))?;
        writer.flush().map_err(export_err)
    }
}

fn series_points(series: &CovarianceSeries) -> Vec<SeriesPoint> {
    series
        .rows()
        .iter()
        .enumerate()
        .map(|(k, row)| SeriesPoint {
            time_secs: series.time_at(k),
            covariance: *row,
        })
        .collect()
}

/// Write `time,LP,LK,MP,MK,HP,HK` rows
pub fn write_csv_to<W: Write>(series: &CovarianceSeries, writer: &mut W) -> std::io::Result<()> {
    let header: Vec<&str> = Attack::ALL.iter().map(|a| a.code()).collect();
    writeln!(writer, "time,{}", header.join(","))?;

    for (k, row) in series.rows().iter().enumerate() {
        let values: Vec<String> = row.iter().map(|v| format!("{:.9}", v)).collect();
        writeln!(writer, "{:.6},{}", series.time_at(k), values.join(","))?;
    }
    Ok(())
}

pub fn write_csv(series: &CovarianceSeries, path: &Path) -> Result<()> {
    let export_err = |source: std::io::Error| AnalysisError::Export {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(export_err)?;
    let mut writer = BufWriter::new(file);
    write_csv_to(series, &mut writer).map_err(export_err)?;
    writer.flush().map_err(export_err)
}
