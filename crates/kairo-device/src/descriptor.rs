//! The device-descriptor accessor contract.
//!
//! Both descriptor flavors, the structured [`Target`](crate::Target) and the
//! record-shaped [`LegacyBackend`](crate::LegacyBackend), expose the same six
//! derivable fields through this trait. The compiler's configuration resolver
//! only ever talks to a device through it.
//!
//! | Accessor | Value |
//! |----------|-------|
//! | [`coupling_map`](DeviceDescriptor::coupling_map) | connectivity graph |
//! | [`operation_names`](DeviceDescriptor::operation_names) | basis gate set |
//! | [`durations`](DeviceDescriptor::durations) | per-instruction duration table |
//! | [`instruction_schedule_map`](DeviceDescriptor::instruction_schedule_map) | calibration schedules |
//! | [`timing_constraints`](DeviceDescriptor::timing_constraints) | alignment granularities |
//! | [`properties`](DeviceDescriptor::properties) | error / coherence table |
//!
//! Every accessor is pure: no arguments, no I/O, and the same answer on
//! every call. `None` means the descriptor cannot supply that field.

use crate::calibration::InstructionScheduleMap;
use crate::coupling::CouplingMap;
use crate::durations::InstructionDurations;
use crate::operations::BasisGates;
use crate::properties::BackendProperties;
use crate::timing::TimingConstraints;

/// Read-only view over a physical or simulated device.
pub trait DeviceDescriptor: Send + Sync {
    /// Device name.
    fn name(&self) -> &str;

    /// Number of physical qubits.
    fn num_qubits(&self) -> u32;

    /// Allowed two-qubit interactions.
    fn coupling_map(&self) -> Option<CouplingMap>;

    /// Operations the device executes natively.
    fn operation_names(&self) -> Option<BasisGates>;

    /// Instruction durations.
    fn durations(&self) -> Option<InstructionDurations>;

    /// Pulse schedules for calibrated instructions.
    fn instruction_schedule_map(&self) -> Option<InstructionScheduleMap>;

    /// Pulse alignment restrictions.
    fn timing_constraints(&self) -> Option<TimingConstraints>;

    /// Error rates and coherence times.
    fn properties(&self) -> Option<BackendProperties>;
}
