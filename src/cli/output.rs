// src/cli/output.rs
//
// Terminal output for a finished run.

use colorful::Colorful;

use crate::config::Attack;
use crate::core::AnalysisOutcome;

/// Plain-text summary, one line per reference
pub fn format_summary(outcome: &AnalysisOutcome) -> String {
    let summary = &outcome.summary;
    let mut output = String::new();

    output.push_str(&format!(
        "  Sample Rate: {} Hz (after decimation)\n",
        outcome.sample_rate
    ));
    output.push_str(&format!(
        "  Reference: {} samples, Recording: {} samples\n",
        outcome.reference_len, outcome.recording_len
    ));
    output.push_str(&format!(
        "  Windows: {} ({:.2}s)\n",
        summary.windows,
        outcome.series.duration_secs()
    ));
    for trim in &outcome.trims {
        output.push_str(&format!(
            "  Trimmed {} by {} sample(s)\n",
            trim.attack, trim.removed
        ));
    }

    output.push('\n');
    output.push_str("  Ref  Best   Peak cov  Peak at   Mean cov\n");
    for attack in Attack::ALL {
        let stats = summary.stats(attack);
        let share = if summary.windows > 0 {
            stats.best_match_windows as f64 / summary.windows as f64 * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "  {:<4} {:>5.1}% {:>9.3} {:>7.2}s {:>10.3}\n",
            attack.code(),
            share,
            stats.peak_covariance,
            stats.peak_time_secs,
            stats.mean_covariance
        ));
    }

    if summary.undecided_windows > 0 {
        output.push_str(&format!(
            "  {} window(s) without a best match\n",
            summary.undecided_windows
        ));
    }

    output
}

/// Print the summary with highlights
pub fn print_summary(outcome: &AnalysisOutcome, chart_path: &std::path::Path) {
    println!("{}", "Attack sound covariance".to_string().cyan());
    print!("{}", format_summary(outcome));

    match outcome.summary.dominant() {
        Some(attack) => println!(
            "\n  Dominant match: {}",
            format!("{} ({})", attack.code(), attack.description()).green()
        ),
        None => println!("\n  {}", "No window produced a match".to_string().yellow()),
    }

    if !outcome.trims.is_empty() {
        println!(
            "  {}",
            "References had unequal lengths and were truncated".to_string().yellow()
        );
    }

    println!("  Chart saved to: {}", chart_path.display());
}
