//! Command-line interface

mod args;
mod output;

pub use args::Args;
pub use output::{format_summary, print_summary};

use anyhow::{Context, Result};
use log::info;

use crate::core::AttackAnalyzer;
use crate::report::{write_csv, AnalysisReport};

/// Run the full analysis described by `args`
pub fn run(args: &Args) -> Result<()> {
    let config = args
        .analysis_config()
        .context("Invalid configuration")?;
    let analyzer = AttackAnalyzer::new(config)?;

    let outcome = analyzer.run().with_context(|| {
        format!(
            "Analysis of {} failed",
            analyzer.config().folder.display()
        )
    })?;

    outcome
        .render_chart(&args.output, &args.chart_config())
        .context("Failed to render chart")?;

    if let Some(path) = &args.json {
        AnalysisReport::new(
            &outcome,
            analyzer.config(),
            analyzer.plan().passes(),
            args.include_series,
        )
        .write_json(path)
        .context("Failed to write JSON report")?;
        info!("report written to {}", path.display());
    }

    if let Some(path) = &args.csv {
        write_csv(&outcome.series, path).context("Failed to write CSV")?;
        info!("series written to {}", path.display());
    }

    print_summary(&outcome, &args.output);
    Ok(())
}
