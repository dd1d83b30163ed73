//! Devices command implementation.

use anyhow::Result;
use console::style;

use kairo_device::{DeviceDescriptor, FAKE_DEVICES};

/// Execute the devices command.
pub fn execute() -> Result<()> {
    println!("{} Fake devices:\n", style("Kairo").cyan().bold());

    for record in FAKE_DEVICES {
        let backend = record.backend()?;
        println!(
            "  {} {} / {}_v2",
            style("●").green(),
            style(record.name).bold(),
            record.name
        );
        println!("    Qubits: {}", record.num_qubits);
        println!("    Topology: {}", record.topology);
        if let Some(basis) = backend.operation_names() {
            println!("    Gates: {}", basis.to_vec().join(", "));
        }
        println!(
            "    Pulse defaults: {}",
            if record.has_pulse_defaults() {
                style("yes").green()
            } else {
                style("no").dim()
            }
        );
        println!();
    }

    Ok(())
}
