//! Configuration module for attackcov

mod attacks;
mod settings;

pub use attacks::{Attack, REFERENCE_COUNT};
pub use settings::{
    AnalysisConfig, ConfigBuilder, DEFAULT_DECIMATION_FACTOR, DEFAULT_PASS_FACTOR,
    DEFAULT_WINDOW_STEP,
};
