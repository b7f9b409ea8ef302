//! Levels command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use crate::config::Config;
use crate::level::Level;

/// Level files in `dir`, sorted by file name.
pub fn level_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Execute the levels command.
pub fn execute(config: &Config, dir: Option<&Path>) -> Result<()> {
    let dir = dir.unwrap_or(&config.levels_dir);
    let files = level_files(dir)?;

    println!("{}", style("Available levels:").bold());
    println!();
    if files.is_empty() {
        println!("  (none in {})", dir.display());
        return Ok(());
    }

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match Level::load(&path) {
            Ok(level) => println!(
                "  {} {:<16} {:<14} {} qubits on {} physical, {} edges, {} two-qubit gates",
                style("●").green(),
                style(file_name).cyan(),
                level.name,
                level.circuit.num_qubits(),
                level.architecture.num_qubits(),
                level.architecture.edges().len(),
                level.circuit.two_qubit_count()
            ),
            Err(e) => println!(
                "  {} {:<16} {}",
                style("○").red(),
                style(file_name).cyan(),
                style(format!("{e:#}")).red()
            ),
        }
    }
    Ok(())
}
