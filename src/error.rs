// src/error.rs
//
// Error taxonomy for the analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the covariance pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot open audio file {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("signal '{name}' has {found} samples, expected {expected}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("signal '{name}' has zero variance and cannot be normalized")]
    DegenerateSignal { name: String },

    #[error("recording ({recording} samples) must be longer than the references ({reference} samples)")]
    RecordingTooShort { recording: usize, reference: usize },

    #[error("signal '{name}' is empty")]
    EmptySignal { name: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("cannot write {}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
