//! Kairo Device Descriptors
//!
//! This crate describes the quantum devices a pipeline is compiled for. It
//! defines the read-only [`DeviceDescriptor`] contract, the two descriptor
//! flavors that implement it, and the value types of the six fields a
//! compiler can derive from a device.
//!
//! # Overview
//!
//! | Field | Type |
//! |-------|------|
//! | Connectivity graph | [`CouplingMap`] |
//! | Operation names | [`BasisGates`] |
//! | Duration table | [`InstructionDurations`] |
//! | Calibration schedules | [`InstructionScheduleMap`] |
//! | Timing constraints | [`TimingConstraints`] |
//! | Property table | [`BackendProperties`] |
//!
//! # Descriptor flavors
//!
//! - [`Target`]: structured; one table of instructions × qubit tuples, from
//!   which every field is projected.
//! - [`LegacyBackend`]: record-shaped; wraps the configuration, properties
//!   and pulse-defaults records a device publishes.
//!
//! # Fake devices
//!
//! [`FAKE_DEVICES`] lists static device records embedded in the crate. One
//! parameterized factory builds either flavor from a record:
//!
//! ```
//! use kairo_device::{fake_target, DeviceDescriptor};
//!
//! let montreal = fake_target("fake_montreal").unwrap();
//! assert_eq!(montreal.num_qubits(), 27);
//! assert!(!montreal.instruction_schedule_map().unwrap().is_empty());
//! ```

pub mod backend;
pub mod calibration;
pub mod coupling;
pub mod descriptor;
pub mod durations;
pub mod error;
pub mod fake;
pub mod operations;
pub mod properties;
pub mod target;
pub mod timing;

pub use backend::{BackendConfiguration, Command, LegacyBackend, PulseDefaults};
pub use calibration::{InstructionScheduleMap, Pulse, Schedule};
pub use coupling::CouplingMap;
pub use descriptor::DeviceDescriptor;
pub use durations::InstructionDurations;
pub use error::{DeviceError, DeviceResult};
pub use fake::{DeviceRecord, FAKE_DEVICES, fake_backend, fake_record, fake_target};
pub use operations::BasisGates;
pub use properties::{BackendProperties, GateProperties, QubitProperties};
pub use target::{InstructionProperties, Target};
pub use timing::TimingConstraints;
