//! Report generation for allocation experiments.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::config::Config;

use super::runner::ExperimentResults;

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub trials: usize,
    pub as_count: usize,
    pub block_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Full experiment report
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub metadata: ReportMetadata,
    pub results: ExperimentResults,
}

/// Assemble the report structure from a finished experiment
pub fn build_report(config: &Config, results: ExperimentResults) -> ExperimentReport {
    ExperimentReport {
        metadata: ReportMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            trials: config.experiment.trials,
            as_count: config.experiment.as_count,
            block_count: config.experiment.block_count,
            seed: config.experiment.seed,
        },
        results,
    }
}

/// Generate JSON report
pub fn generate_json_report(report: &ExperimentReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Render the human-readable text report
pub fn render_text_report(report: &ExperimentReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                    STABLE ADDRESS ALLOCATION EXPERIMENT".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    // Metadata
    lines.push(format!("Generated: {}", report.metadata.generated_at));
    lines.push(format!("Trials: {}", report.metadata.trials));
    lines.push(format!(
        "Instance size: {} ASes x {} blocks",
        report.metadata.as_count, report.metadata.block_count
    ));
    if let Some(seed) = report.metadata.seed {
        lines.push(format!("Seed: {}", seed));
    }
    lines.push(String::new());

    // Per-trial results
    lines.push("Aggregatable pairs per trial (stable vs random):".to_string());
    for (i, trial) in report.results.trials.iter().enumerate() {
        lines.push(format!(
            "  Trial {:>3}: {:>3} stable  {:>3} random  ({} matched, {} proposals)",
            i + 1,
            trial.stable_aggregations,
            trial.random_aggregations,
            trial.matched,
            trial.proposals
        ));
    }
    lines.push(String::new());

    // Summary
    lines.push(format!(
        "Totals: {} aggregatable pairs stable vs {} random",
        report.results.stable_total, report.results.random_total
    ));
    lines.push(format!(
        "Means:  {:.2} per trial stable vs {:.2} random",
        report.results.stable_mean, report.results.random_mean
    ));
    lines.push("=".repeat(80));

    lines.join("\n")
}
