//! Run command implementation.

use anyhow::Result;
use tracing::debug;

use crate::config::QpadConfig;

use super::common::{SimulationArgs, announce, load_program, simulate_and_print};

/// Execute the run command on a textual program.
pub fn execute(
    input: Option<&str>,
    program: Option<&str>,
    args: &SimulationArgs,
    config: &QpadConfig,
) -> Result<()> {
    let config = args.apply(config)?;
    announce("program", input.unwrap_or("<inline>"), &config);

    let circuit = load_program(input, program)?;
    debug!(instructions = circuit.len(), "program parsed");

    simulate_and_print(&circuit, &config, &args.format)
}
