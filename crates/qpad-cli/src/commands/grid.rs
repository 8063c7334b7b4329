//! Grid command implementation.

use anyhow::Result;
use tracing::debug;

use qpad_source::build_from_grid;

use crate::config::QpadConfig;

use super::common::{SimulationArgs, announce, load_grid, simulate_and_print};

/// Execute the grid command on a JSON grid file.
pub fn execute(
    input: &str,
    measure_all: bool,
    args: &SimulationArgs,
    config: &QpadConfig,
) -> Result<()> {
    let config = args.apply(config)?;
    announce("grid", input, &config);

    let grid = load_grid(input)?;
    debug!(
        wires = grid.num_wires(),
        steps = grid.num_steps(),
        "grid loaded"
    );

    let mut circuit = build_from_grid(&grid, &config.grid)?;
    if measure_all {
        circuit.measure_all()?;
    }

    simulate_and_print(&circuit, &config, &args.format)
}
