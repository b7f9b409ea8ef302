//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Swaperation - interactive qubit routing
#[derive(Parser)]
#[command(name = "swaperation")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./swaperation.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List level files
    Levels {
        /// Levels directory (overrides the configured one)
        dir: Option<PathBuf>,
    },

    /// Route a circuit by replaying a script of swaps
    Play {
        /// Level file (YAML)
        #[arg(short, long, conflicts_with_all = ["circuit", "arch"], required_unless_present = "circuit")]
        level: Option<PathBuf>,

        /// Circuit file (OpenQASM 2.0)
        #[arg(short, long, requires = "arch")]
        circuit: Option<PathBuf>,

        /// Architecture (linear:N, star:N, full:N, lattice:RxC, edges:A-B,...)
        #[arg(short, long)]
        arch: Option<String>,

        /// Script file, or - for stdin
        #[arg(short, long, default_value = "-")]
        script: String,

        /// Run name for the output files
        #[arg(short, long)]
        output: Option<String>,

        /// Finish with shortest-path swaps if the script stops early
        #[arg(long)]
        auto: bool,
    },

    /// Verify recorded runs
    Verify {
        /// Directory holding initial_circuit_*, final_circuit_* and details_* files
        dir: Option<PathBuf>,
    },

    /// Show version information
    Version,
}
