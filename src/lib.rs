//! attackcov - Find which attack sound matches each moment of a recording
//!
//! Six short reference clips (light, medium and heavy punches and kicks)
//! are compared against a continuous recording by sliding a window of the
//! clips' length across it and computing the covariance between each
//! window and each clip.
//!
//! ## Pipeline
//!
//! 1. **Load** the clips and the recording, down-mixed to mono
//! 2. **Decimate** by 100 in two zero-phase FIR passes of 10
//! 3. **Align** the clips to their shortest common length
//! 4. **Normalize** every sequence to unit standard deviation
//! 5. **Scan**: for each window position, re-normalize the window and take
//!    the biased 7x7 covariance matrix of the window and the six clips;
//!    row 0 (columns 1-6) is the output
//! 6. **Render** the six series and the recording envelope as a chart
//!
//! ## Module Structure
//!
//! - `core` - Loading, DSP, alignment, scanning and rendering
//! - `cli` - Command-line interface
//! - `config` - Reference identities and analysis configuration
//! - `report` - Result table, match summary, JSON/CSV export
//! - `error` - Error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attackcov::{AnalysisConfig, AttackAnalyzer, ChartConfig};
//!
//! let analyzer = AttackAnalyzer::new(AnalysisConfig::default())?;
//! let outcome = analyzer.run()?;
//! outcome.render_chart(Path::new("covariance.png"), &ChartConfig::default())?;
//!
//! println!("Best overall match: {:?}", outcome.summary.dominant());
//! ```

// Core pipeline
pub mod core;

// Command-line interface
pub mod cli;

// Configuration
pub mod config;

// Errors
pub mod error;

// Result types and export
pub mod report;

pub use config::{AnalysisConfig, Attack, ConfigBuilder, REFERENCE_COUNT};
pub use core::{
    AnalysisOutcome, AttackAnalyzer, ChartConfig, CovarianceScanner, DecimationPlan, Signal, Trim,
};
pub use error::{AnalysisError, Result};
pub use report::{AnalysisReport, CovarianceRow, CovarianceSeries, MatchSummary};
