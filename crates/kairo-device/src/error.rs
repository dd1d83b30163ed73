//! Error types for the device crate.

use thiserror::Error;

/// Errors that can occur while loading or validating device descriptors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// No fake device record is registered under this name.
    #[error("Unknown device '{name}'. Available: {}", available.join(", "))]
    UnknownDevice {
        /// The requested device name.
        name: String,
        /// Names of all registered devices.
        available: Vec<String>,
    },

    /// A record file could not be parsed.
    #[error("Malformed {file} record for device '{device}': {source}")]
    MalformedRecord {
        /// Device the record belongs to.
        device: String,
        /// Which companion file failed (configuration, properties, defaults).
        file: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but is internally inconsistent.
    #[error("Invalid record for device '{device}': {reason}")]
    InvalidRecord {
        /// Device the record belongs to.
        device: String,
        /// What is inconsistent.
        reason: String,
    },

    /// A coupling map names qubits it cannot hold.
    #[error("Invalid coupling map: {reason}")]
    InvalidCouplingMap {
        /// What is out of range.
        reason: String,
    },
}

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;
