//! Swaperation Command-Line Interface
//!
//! Route circuits by hand, one swap at a time, and check the result.
//!
//! ```text
//!   q0 ──●─────        p0 ──●──╳──⊕──
//!        │                  │  │  │
//!   q1 ──⊕──●──   →    p1 ──⊕──┼──●──
//!           │                  │
//!   q2 ─────⊕──        p2 ─────╳─────
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use swaperation_cli::cli::{Cli, Commands};
use swaperation_cli::commands::play::{PlayOptions, PlaySource};
use swaperation_cli::commands::{levels, play, verify, version};
use swaperation_cli::config::Config;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Levels { dir } => levels::execute(&config, dir.as_deref()),

        Commands::Play {
            level,
            circuit,
            arch,
            script,
            output,
            auto,
        } => {
            let source = match (level, circuit, arch) {
                (Some(path), _, _) => PlaySource::Level(path),
                (None, Some(path), Some(arch)) => PlaySource::Circuit { path, arch },
                _ => {
                    eprintln!(
                        "{} either --level or --circuit with --arch is required",
                        style("Error:").red().bold()
                    );
                    std::process::exit(2);
                }
            };
            play::execute(
                &config,
                &PlayOptions {
                    source,
                    script,
                    output,
                    auto,
                },
            )
        }

        Commands::Verify { dir } => verify::execute(&config, dir.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
