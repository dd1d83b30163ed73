//! Fake devices built from static records.
//!
//! Each fake device is a [`DeviceRecord`]: a display name, a qubit count, a
//! topology label, and the embedded JSON companion records (configuration,
//! calibration properties, and optionally pulse defaults). A single factory
//! turns a record into either descriptor variant:
//!
//! ```
//! use kairo_device::{fake_backend, fake_target, DeviceDescriptor};
//!
//! let backend = fake_backend("fake_london").unwrap();
//! let target = fake_target("fake_london").unwrap();
//!
//! assert_eq!(backend.num_qubits(), 5);
//! assert_eq!(target.name(), "fake_london_v2");
//! assert_eq!(backend.coupling_map(), target.coupling_map());
//! ```

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::backend::{BackendConfiguration, LegacyBackend, PulseDefaults};
use crate::error::{DeviceError, DeviceResult};
use crate::properties::BackendProperties;
use crate::target::Target;

/// Static description of a fake device.
#[derive(Debug, Clone, Copy)]
pub struct DeviceRecord {
    /// Device name (the legacy variant's name).
    pub name: &'static str,
    /// Number of physical qubits.
    pub num_qubits: u32,
    /// Human-readable topology label.
    pub topology: &'static str,
    conf: &'static str,
    props: &'static str,
    defs: Option<&'static str>,
}

/// Registered fake devices.
pub const FAKE_DEVICES: &[DeviceRecord] = &[
    DeviceRecord {
        name: "fake_london",
        num_qubits: 5,
        topology: "T-shape: 0-1-2, 1-3-4",
        conf: include_str!("../data/london/conf_london.json"),
        props: include_str!("../data/london/props_london.json"),
        defs: None,
    },
    DeviceRecord {
        name: "fake_montreal",
        num_qubits: 27,
        topology: "heavy-hex (Falcon r4)",
        conf: include_str!("../data/montreal/conf_montreal.json"),
        props: include_str!("../data/montreal/props_montreal.json"),
        defs: Some(include_str!("../data/montreal/defs_montreal.json")),
    },
];

impl DeviceRecord {
    /// Whether the record ships pulse defaults.
    pub fn has_pulse_defaults(&self) -> bool {
        self.defs.is_some()
    }

    fn parse<T: DeserializeOwned>(&self, file: &'static str, source: &str) -> DeviceResult<T> {
        serde_json::from_str(source).map_err(|source| DeviceError::MalformedRecord {
            device: self.name.to_string(),
            file,
            source,
        })
    }

    /// Build the record-shaped descriptor.
    pub fn backend(&self) -> DeviceResult<LegacyBackend> {
        let conf: BackendConfiguration = self.parse("configuration", self.conf)?;
        let props: BackendProperties = self.parse("properties", self.props)?;
        let defs: Option<PulseDefaults> = self
            .defs
            .map(|defs| self.parse("defaults", defs))
            .transpose()?;

        if conf.n_qubits != self.num_qubits {
            return Err(DeviceError::InvalidRecord {
                device: self.name.to_string(),
                reason: format!(
                    "configuration has {} qubits, record declares {}",
                    conf.n_qubits, self.num_qubits
                ),
            });
        }

        debug!(
            device = self.name,
            pulse_defaults = defs.is_some(),
            "Loaded fake backend records"
        );
        LegacyBackend::new(conf, Some(props), defs)
    }

    /// Build the structured descriptor.
    pub fn target(&self) -> DeviceResult<Target> {
        Ok(Target::from_backend(&self.backend()?))
    }
}

/// Look up a fake device record by name.
///
/// Accepts both the legacy name (`fake_london`) and the structured-variant
/// name (`fake_london_v2`).
pub fn fake_record(name: &str) -> DeviceResult<&'static DeviceRecord> {
    let base = name.strip_suffix("_v2").unwrap_or(name);
    FAKE_DEVICES
        .iter()
        .find(|record| record.name.eq_ignore_ascii_case(base))
        .ok_or_else(|| DeviceError::UnknownDevice {
            name: name.to_string(),
            available: FAKE_DEVICES.iter().map(|r| r.name.to_string()).collect(),
        })
}

/// Build the record-shaped descriptor of a fake device.
pub fn fake_backend(name: &str) -> DeviceResult<LegacyBackend> {
    fake_record(name)?.backend()
}

/// Build the structured descriptor of a fake device.
pub fn fake_target(name: &str) -> DeviceResult<Target> {
    fake_record(name)?.target()
}
