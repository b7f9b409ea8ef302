//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use swaperation_ir::Circuit;
use swaperation_qasm::{emit, parse_named};
use swaperation_route::{RoutingOutcome, RoutingSummary};

/// Load a circuit from an OpenQASM 2.0 file.
pub fn load_circuit(path: &Path) -> Result<Circuit> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "circuit".to_string());
    parse_named(&name, &source).with_context(|| format!("Parse error in {}", path.display()))
}

/// The three files of one recorded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFiles {
    pub initial_circuit: PathBuf,
    pub final_circuit: PathBuf,
    pub details: PathBuf,
}

impl RunFiles {
    pub const INITIAL_PREFIX: &'static str = "initial_circuit_";

    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            initial_circuit: dir.join(format!("{}{name}.qasm", Self::INITIAL_PREFIX)),
            final_circuit: dir.join(format!("final_circuit_{name}.qasm")),
            details: dir.join(format!("details_{name}.json")),
        }
    }

    /// Run name of an `initial_circuit_NAME.qasm` file name.
    pub fn run_name(file_name: &str) -> Option<&str> {
        file_name
            .strip_prefix(Self::INITIAL_PREFIX)?
            .strip_suffix(".qasm")
            .filter(|name| !name.is_empty())
    }

    /// Write the original circuit, routed circuit and summary.
    pub fn write(&self, outcome: &RoutingOutcome) -> Result<()> {
        if let Some(dir) = self.details.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        write_text(&self.initial_circuit, &emit(&outcome.original))?;
        write_text(&self.final_circuit, &emit(&outcome.routed))?;
        let json = serde_json::to_string_pretty(&outcome.summary)?;
        write_text(&self.details, &json)
    }

    /// Read the run back.
    pub fn read(&self) -> Result<(RoutingSummary, Circuit, Circuit)> {
        let json = fs::read_to_string(&self.details)
            .with_context(|| format!("Failed to read file: {}", self.details.display()))?;
        let summary: RoutingSummary = serde_json::from_str(&json)
            .with_context(|| format!("Invalid run details: {}", self.details.display()))?;
        let original = load_circuit(&self.initial_circuit)?;
        let routed = load_circuit(&self.final_circuit)?;
        Ok((summary, original, routed))
    }
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Print a finished run's summary.
pub fn print_summary(summary: &RoutingSummary) {
    println!(
        "\n{} Routing complete with {} swap(s)",
        style("✓").green().bold(),
        style(summary.num_swaps).yellow()
    );
    println!(
        "  Qubits:          {} logical on {} physical",
        summary.num_circuit_qubits, summary.num_arc_qubits
    );
    println!("  Initial mapping: {:?}", summary.initial_mapping.as_slice());
    println!("  Final mapping:   {:?}", summary.final_mapping.as_slice());
}
