//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - activation test template generation",
        style("QATG").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qatg-ir     Gates, unitaries and statevectors");
    println!("  qatg-synth  Rotation synthesis into basis gate sets");
    println!("  qatg-core   Activation search and template generation");
    println!("  qatg-cli    Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
