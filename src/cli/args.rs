// src/cli/args.rs
//
// Command-line arguments and their merge with the configuration file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{AnalysisConfig, ConfigBuilder};
use crate::core::ChartConfig;
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "attackcov")]
#[command(about = "Match attack sound effects against a recording by sliding-window covariance")]
pub struct Args {
    /// Folder holding LP/LK/MP/MK/HP/HK.wav and whole.wav
    #[arg(short, long, env = "ATTACKCOV_FOLDER")]
    pub folder: Option<PathBuf>,

    /// JSON configuration file (command-line options take precedence)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Chart image to write
    #[arg(short, long, default_value = "covariance.png")]
    pub output: PathBuf,

    /// Write a JSON report
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Embed every covariance row in the JSON report
    #[arg(long, requires = "json")]
    pub include_series: bool,

    /// Write the covariance series as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Window step in decimated samples
    #[arg(long)]
    pub step: Option<usize>,

    /// Total decimation factor
    #[arg(long)]
    pub decimation: Option<u32>,

    /// Chart width in pixels
    #[arg(long, default_value = "1600")]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Configuration from the optional file, with command-line overrides applied
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        let mut builder = ConfigBuilder::from_config(base);
        if let Some(folder) = &self.folder {
            builder = builder.folder(folder.clone());
        }
        if let Some(step) = self.step {
            builder = builder.window_step(step);
        }
        if let Some(factor) = self.decimation {
            builder = builder.decimation_factor(factor);
        }
        if self.no_progress {
            builder = builder.show_progress(false);
        }
        builder.build()
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            width: self.width,
            height: self.height,
            ..ChartConfig::default()
        }
    }
}
