//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use qpad_adapter_sim::{Counts, SimulationOutput};
use qpad_ir::CircuitModel;
use qpad_source::CircuitGridState;

use crate::config::QpadConfig;

/// Flags shared by the `run` and `grid` commands.
#[derive(Args, Debug, Clone)]
pub struct SimulationArgs {
    /// Number of shots (defaults to the configured value)
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Output mode (statevector, counts, memory)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Seed for the shot sampler
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

impl SimulationArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &QpadConfig) -> Result<QpadConfig> {
        let mut config = config.clone();
        if let Some(shots) = self.shots {
            config.simulation.shots = shots;
        }
        if let Some(mode) = &self.mode {
            config.simulation.mode.clone_from(mode);
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Read a whole file, failing with a readable message if it is missing.
pub fn read_source(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Load a circuit from a textual program file or an inline program.
pub fn load_program(input: Option<&str>, program: Option<&str>) -> Result<CircuitModel> {
    let source = match (input, program) {
        (Some(path), None) => read_source(path)?,
        (None, Some(text)) => text.to_string(),
        _ => anyhow::bail!("Provide exactly one of --input or --program"),
    };
    qpad_source::parse_text(&source)
        .ok_or_else(|| anyhow::anyhow!("Program declares no qubits (expected `qreg q[N]`)"))
}

/// Load a grid from a JSON array of rows.
pub fn load_grid(path: &str) -> Result<CircuitGridState> {
    let source = read_source(path)?;
    serde_json::from_str(&source).with_context(|| format!("Invalid grid JSON in {path}"))
}

/// Run `circuit` with the effective configuration and print the result.
pub fn simulate_and_print(circuit: &CircuitModel, config: &QpadConfig, format: &str) -> Result<()> {
    let mode = config.output_mode()?;
    let shots = config.simulation.shots;

    println!(
        "  Loaded: {} qubits, {} clbits, {} instructions",
        circuit.num_qubits(),
        circuit.num_clbits(),
        circuit.len()
    );

    let output = config.simulator().run(circuit, shots, mode)?;

    match format.to_lowercase().as_str() {
        "table" => {
            print_output(&output, shots);
            Ok(())
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
}

/// Print a simulation result in table form.
pub fn print_output(output: &SimulationOutput, shots: u32) {
    match output {
        SimulationOutput::Counts(counts) => print_counts(counts, shots),
        SimulationOutput::Statevector(amps) => {
            println!(
                "\n{} Statevector ({} amplitudes):",
                style("✓").green().bold(),
                amps.len()
            );
            let width = amps.len().trailing_zeros() as usize;
            for (index, amp) in amps.iter().enumerate() {
                let prob = amp.norm_sqr();
                if prob < 1e-12 {
                    continue;
                }
                println!(
                    "  |{}⟩: {:>9.6} {:>+9.6}i  (p = {:.4})",
                    style(format!("{index:0width$b}")).cyan(),
                    amp.re,
                    amp.im,
                    prob
                );
            }
        }
        SimulationOutput::Memory(presence) => {
            println!("\n{} Measured qubits:", style("✓").green().bold());
            for (q, measured) in presence.iter().enumerate() {
                let mark = if *measured {
                    style("measured").green()
                } else {
                    style("unmeasured").dim()
                };
                println!("  q{q}: {mark}");
            }
        }
    }
}

fn print_counts(counts: &Counts, shots: u32) {
    println!("\n{} Results ({} shots):", style("✓").green().bold(), shots);

    let sorted = counts.sorted();
    let total = counts.total_shots().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}

/// Banner line shared by the simulation commands.
pub fn announce(what: &str, source: &str, config: &QpadConfig) {
    println!(
        "{} Simulating {} {} ({} mode, {} shots)",
        style("→").cyan().bold(),
        what,
        style(source).green(),
        style(&config.simulation.mode).yellow(),
        config.simulation.shots
    );
}
