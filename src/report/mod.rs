//! Scan results: the covariance table, match summary and exports

mod export;
mod series;
mod summary;

pub use export::{write_csv, write_csv_to, AnalysisReport, SeriesPoint};
pub use series::{CovarianceRow, CovarianceSeries};
pub use summary::{best_match, MatchSummary, ReferenceStats};
