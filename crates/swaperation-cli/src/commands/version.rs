//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - interactive qubit routing",
        style("Swaperation").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  swaperation-ir      Gates, circuits and architectures");
    println!("  swaperation-qasm    OpenQASM 2.0 reader and writer");
    println!("  swaperation-route   Routing state machine");
    println!("  swaperation-verify  Equivalence and compliance checks");
    println!("  swaperation-cli     Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
