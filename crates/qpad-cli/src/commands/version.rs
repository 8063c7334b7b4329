//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit statevector simulator",
        style("Qpad").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpad-ir           Circuit model and gate decomposition");
    println!("  qpad-source       Text and grid instruction sources");
    println!("  qpad-adapter-sim  Statevector engine and sampler");
    println!("  qpad-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
