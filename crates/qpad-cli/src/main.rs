//! Qpad Command-Line Interface
//!
//! The main entry point for the `qpad` tool: parse a textual program or a
//! JSON grid, simulate it on the local statevector engine and print the
//! amplitudes, counts or measurement presence.
//!
//! ```text
//! qpad run -p "qreg q[2]; creg c[2]; h q[0]; x q[1]" -m statevector
//! qpad grid -i grid.json --measure-all -s 4096 --seed 7
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::SimulationArgs;
use commands::{grid, run, version};
use config::QpadConfig;

/// Qpad - quantum circuit statevector simulator
#[derive(Parser)]
#[command(name = "qpad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a textual program
    Run {
        /// Program file
        #[arg(short, long, conflicts_with = "program", required_unless_present = "program")]
        input: Option<String>,

        /// Inline program text
        #[arg(short, long)]
        program: Option<String>,

        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Simulate a grid of cell codes
    Grid {
        /// Grid file (JSON array of rows)
        #[arg(short, long)]
        input: String,

        /// Measure every qubit into its classical bit after the last column
        #[arg(long)]
        measure_all: bool,

        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so the configured level applies
    let config = QpadConfig::load(cli.config.as_deref());

    // Setup logging
    let filter = match cli.verbose {
        0 => config
            .as_ref()
            .map_or("warn", |c| c.logging.level.as_str())
            .to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = config.map_err(anyhow::Error::from).and_then(|config| match cli.command {
        Commands::Run {
            input,
            program,
            sim,
        } => run::execute(input.as_deref(), program.as_deref(), &sim, &config),

        Commands::Grid {
            input,
            measure_all,
            sim,
        } => grid::execute(&input, measure_all, &sim, &config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
