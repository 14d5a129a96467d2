// src/config/settings.rs
//
// Analysis configuration threaded through every pipeline stage.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::attacks::{Attack, REFERENCE_COUNT};
use crate::error::{AnalysisError, Result};

/// Decimation applied in a single pass with a FIR filter of `20 * q + 1` taps
pub const DEFAULT_PASS_FACTOR: u32 = 10;

/// Total decimation: two passes of `DEFAULT_PASS_FACTOR`
pub const DEFAULT_DECIMATION_FACTOR: u32 = DEFAULT_PASS_FACTOR * DEFAULT_PASS_FACTOR;

/// Window advance in decimated samples
pub const DEFAULT_WINDOW_STEP: usize = 1;

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Folder holding the reference clips and the recording
    pub folder: PathBuf,
    /// Reference file names, in `Attack::ALL` order
    pub reference_files: [String; REFERENCE_COUNT],
    /// File name of the continuous recording
    pub recording_file: String,
    /// Total decimation factor (split into passes when above the single-pass limit)
    pub decimation_factor: u32,
    /// Window step in decimated samples
    pub window_step: usize,
    /// Show a progress bar while scanning
    pub show_progress: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("./SFV_SE/"),
            reference_files: Attack::ALL.map(|a| a.file_name()),
            recording_file: "whole.wav".to_string(),
            decimation_factor: DEFAULT_DECIMATION_FACTOR,
            window_step: DEFAULT_WINDOW_STEP,
            show_progress: true,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| AnalysisError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.decimation_factor == 0 {
            return Err(AnalysisError::InvalidConfig(
                "decimation factor must be at least 1".to_string(),
            ));
        }
        if self.window_step == 0 {
            return Err(AnalysisError::InvalidConfig(
                "window step must be at least 1".to_string(),
            ));
        }
        if let Some(attack) = self
            .reference_files
            .iter()
            .position(|f| f.trim().is_empty())
            .and_then(Attack::from_index)
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "no file name given for reference {}",
                attack
            )));
        }
        if self.recording_file.trim().is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "no file name given for the recording".to_string(),
            ));
        }
        Ok(())
    }

    pub fn reference_path(&self, attack: Attack) -> PathBuf {
        self.folder.join(&self.reference_files[attack.index()])
    }

    pub fn recording_path(&self) -> PathBuf {
        self.folder.join(&self.recording_file)
    }
}

/// Builder for `AnalysisConfig`
pub struct ConfigBuilder {
    config: AnalysisConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.folder = folder.into();
        self
    }

    pub fn reference_file(mut self, attack: Attack, name: impl Into<String>) -> Self {
        self.config.reference_files[attack.index()] = name.into();
        self
    }

    pub fn recording_file(mut self, name: impl Into<String>) -> Self {
        self.config.recording_file = name.into();
        self
    }

    pub fn decimation_factor(mut self, factor: u32) -> Self {
        self.config.decimation_factor = factor;
        self
    }

    pub fn window_step(mut self, step: usize) -> Self {
        self.config.window_step = step;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
