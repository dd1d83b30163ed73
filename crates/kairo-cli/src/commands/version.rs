//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - preset compilation pipelines for quantum devices",
        style("Kairo").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  kairo-device   Device descriptors and fake device records");
    println!("  kairo-compile  Configuration resolution and pipeline dispatch");
    println!("  kairo-cli      Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
