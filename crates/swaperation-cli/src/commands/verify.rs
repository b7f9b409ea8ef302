//! Verify command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use console::style;
use swaperation_verify::{Tolerance, verify};
use tracing::info;

use crate::commands::common::RunFiles;
use crate::config::Config;

/// Result of one recorded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

/// Execute the verify command.
pub fn execute(config: &Config, dir: Option<&Path>) -> Result<()> {
    let dir = dir.unwrap_or(&config.output_dir);
    println!(
        "{} Verifying runs in {}",
        style("→").cyan().bold(),
        style(dir.display()).green()
    );

    let results = verify_dir(dir, Tolerance::uniform(config.tolerance))?;
    if results.is_empty() {
        bail!("No runs found in {} (expected initial_circuit_*.qasm)", dir.display());
    }

    for result in &results {
        let mark = if result.passed {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!("  {mark} {:<20} {}", result.name, result.message);
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    info!(runs = results.len(), failed, "Verification finished");
    if failed > 0 {
        bail!("{failed} of {} run(s) failed verification", results.len());
    }
    println!(
        "{} All {} run(s) verified",
        style("✓").green().bold(),
        results.len()
    );
    Ok(())
}

/// Check every run recorded in `dir`, sorted by name.
pub fn verify_dir(dir: &Path, tolerance: Tolerance) -> Result<Vec<RunResult>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let file_name = entry.file_name();
            RunFiles::run_name(&file_name.to_string_lossy()).map(str::to_string)
        })
        .collect();
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| {
            let outcome = RunFiles::new(dir, &name).read().and_then(|(summary, original, routed)| {
                Ok(verify(&summary, &original, &routed, tolerance)?)
            });
            match outcome {
                Ok(report) => RunResult {
                    passed: report.is_ok(),
                    message: report.to_string(),
                    name,
                },
                Err(e) => RunResult {
                    passed: false,
                    message: format!("{e:#}"),
                    name,
                },
            }
        })
        .collect())
}
