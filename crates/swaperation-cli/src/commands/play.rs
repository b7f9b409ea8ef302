//! Play command implementation.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use console::style;
use swaperation_ir::{Architecture, Circuit};
use swaperation_route::{RouteError, RoutingSession, SwapOutcome, route_greedily};
use swaperation_verify::{Tolerance, VerifyError, verify};
use tracing::{info, warn};

use crate::commands::common::{RunFiles, load_circuit, print_summary};
use crate::config::Config;
use crate::level::{Level, parse_arch_spec};
use crate::script::{ScriptCommand, ScriptLine, parse_script};

/// What to route.
#[derive(Debug, Clone)]
pub enum PlaySource {
    Level(PathBuf),
    Circuit { path: PathBuf, arch: String },
}

/// Options of one `play` invocation.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub source: PlaySource,
    /// Script file, or `-` for stdin.
    pub script: String,
    /// Run name for the output files.
    pub output: Option<String>,
    /// Finish with the shortest-path driver if the script stops early.
    pub auto: bool,
}

/// Counters of a replayed script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub accepted: usize,
    pub rejected: usize,
}

/// Execute the play command.
pub fn execute(config: &Config, options: &PlayOptions) -> Result<()> {
    let (name, circuit, architecture) = load_source(&options.source)?;
    println!(
        "{} Routing {} ({} qubits, {} two-qubit gates) on {} physical qubits",
        style("→").cyan().bold(),
        style(&name).green(),
        circuit.num_qubits(),
        circuit.two_qubit_count(),
        architecture.num_qubits()
    );

    let mut session = RoutingSession::new(Arc::new(circuit), Arc::new(architecture))?;
    let script = parse_script(&read_script(&options.script)?)?;
    let stats = replay(&mut session, &script);
    println!(
        "  {} command(s) accepted, {} rejected",
        stats.accepted, stats.rejected
    );

    if !session.is_done() && options.auto {
        println!("{} Finishing with shortest-path swaps", style("→").cyan().bold());
        route_greedily(&mut session)?;
    }

    if !session.is_done() {
        let progress = session.progress();
        println!(
            "\n{} Session not finished: stage {}, {} two-qubit gate(s) remaining, {} swap(s) so far",
            style("…").yellow().bold(),
            session.stage(),
            progress.gates_remaining,
            progress.num_swaps
        );
        if options.output.is_some() {
            bail!("Cannot write output: routing is not finished");
        }
        return Ok(());
    }

    let outcome = session.finish()?;
    print_summary(&outcome.summary);
    if let Some(best) = session.best_score() {
        println!("  Best previous:   {best}");
    }

    let tolerance = Tolerance::uniform(config.tolerance);
    let (summary, original, routed) = match &options.output {
        Some(run) => {
            let files = RunFiles::new(&config.output_dir, run);
            files.write(&outcome)?;
            println!("  Output:          {}", style(files.details.display()).green());
            info!(run = %run, dir = %config.output_dir.display(), "Wrote run files");
            files.read()?
        }
        None => (
            outcome.summary.clone(),
            (*outcome.original).clone(),
            outcome.routed.clone(),
        ),
    };

    match verify(&summary, &original, &routed, tolerance) {
        Ok(report) => {
            let report = report.ensure()?;
            println!(
                "{} Verified: {}",
                style("✓").green().bold(),
                report
            );
        }
        Err(VerifyError::TooManyQubits { num_qubits, max }) => {
            warn!(num_qubits, max, "Skipping self-verification");
            println!(
                "  Skipped verification: {num_qubits} qubits exceed the limit of {max}"
            );
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Replay `script`, reporting and skipping rejected commands.
pub fn replay(session: &mut RoutingSession, script: &[ScriptLine]) -> PlayStats {
    let mut stats = PlayStats::default();
    for &ScriptLine { line, command } in script {
        match apply(session, command) {
            Ok(message) => {
                stats.accepted += 1;
                println!("  {:>4}  {:<12} {}", line, command.to_string(), style(message).dim());
            }
            Err(e) => {
                stats.rejected += 1;
                println!(
                    "  {:>4}  {:<12} {} {}",
                    line,
                    command.to_string(),
                    style("rejected:").yellow().bold(),
                    e
                );
            }
        }
    }
    stats
}

fn apply(session: &mut RoutingSession, command: ScriptCommand) -> Result<String, RouteError> {
    match command {
        ScriptCommand::Swap(x, y) => Ok(match session.swap(x, y)? {
            SwapOutcome::Relabeled => format!("relabeled {:?}", session.current_mapping().as_slice()),
            SwapOutcome::Inserted => format!(
                "inserted, {} swap(s), {} remaining",
                session.num_swaps(),
                session.gates_remaining()
            ),
        }),
        ScriptCommand::Next => {
            let out = session.advance()?;
            Ok(format!(
                "committed {}, stage {}, {} remaining",
                out.committed,
                out.stage,
                session.gates_remaining()
            ))
        }
        ScriptCommand::Restart => {
            session.restart();
            Ok(match session.best_score() {
                Some(best) => format!("best {best}"),
                None => "no finished run yet".to_string(),
            })
        }
    }
}

fn load_source(source: &PlaySource) -> Result<(String, Circuit, Architecture)> {
    match source {
        PlaySource::Level(path) => {
            let level = Level::load(path)?;
            Ok((level.name, level.circuit, level.architecture))
        }
        PlaySource::Circuit { path, arch } => {
            let circuit = load_circuit(path)?;
            let architecture = parse_arch_spec(arch)?;
            Ok((circuit.name().to_string(), circuit, architecture))
        }
    }
}

fn read_script(script: &str) -> Result<String> {
    if script == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(Path::new(script)).with_context(|| format!("Failed to read script: {script}"))
}
