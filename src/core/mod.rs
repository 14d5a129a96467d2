//! Core pipeline: loading, DSP, alignment, scanning and rendering

pub mod align;
pub mod analyzer;
pub mod decoder;
pub mod dsp;
pub mod scanner;
pub mod visualization;

pub use align::{align_references, Trim};
pub use analyzer::{AnalysisOutcome, AttackAnalyzer};
pub use decoder::{load_signal, AudioData, Signal};
pub use dsp::filters::DecimationPlan;
pub use scanner::{window_count, CovarianceScanner};
pub use visualization::ChartConfig;
