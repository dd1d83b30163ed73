//! Error types for the compilation crate.

use thiserror::Error;

use crate::pipeline::StageKind;

/// Errors that can occur while resolving a configuration or building a pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Optimization level outside 0..=3.
    #[error("Invalid optimization level {0}: expected 0, 1, 2 or 3")]
    InvalidLevel(i64),

    /// A stage needs a field that no source supplied.
    #[error("The {stage} stage requires {field}, but none was given or derivable from a device: {reason}")]
    UnresolvedRequirement {
        /// Stage that needs the field.
        stage: StageKind,
        /// Name of the missing field.
        field: &'static str,
        /// Why the stage needs it.
        reason: String,
    },

    /// A method selector string is not a recognized value.
    #[error("Unsupported {selector} '{value}'. Valid values: {}", valid.join(", "))]
    UnsupportedMethod {
        /// Which selector (`layout_method`, `routing_method`, ...).
        selector: &'static str,
        /// The rejected value.
        value: String,
        /// Recognized values.
        valid: &'static [&'static str],
    },

    /// Approximation degree outside [0, 1].
    #[error("Approximation degree {0} is outside [0, 1]")]
    InvalidApproximationDegree(f64),

    /// Initial layout is inconsistent with itself or with the device.
    #[error("Invalid initial layout: {0}")]
    InvalidLayout(String),

    /// Override document could not be parsed.
    #[error("Invalid overrides: {0}")]
    Overrides(#[from] serde_yaml_ng::Error),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
