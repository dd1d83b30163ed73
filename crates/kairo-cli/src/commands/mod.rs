//! CLI command implementations.

pub mod common;
pub mod devices;
pub mod pipeline;
pub mod version;
