//! Override documents.
//!
//! An override document is a YAML (or JSON, which is valid YAML) mapping
//! holding any subset of the explicit configuration fields:
//!
//! ```yaml
//! basis_gates: [rz, sx, x, cx]
//! coupling_map:
//!   edges: [[0, 1], [1, 2]]
//! initial_layout: [2, 0, 1]
//! layout_method: sabre
//! routing_method: lookahead
//! approximation_degree: 0.99
//! seed: 1234
//! ```
//!
//! Method selectors are plain strings in the document and are converted to
//! their enums here, so an unknown value fails at load time.

use serde::Deserialize;

use kairo_device::{
    BackendProperties, BasisGates, CouplingMap, InstructionDurations, TimingConstraints,
};

use crate::config::{ApproximationDegree, PartialConfig, PluginConfig};
use crate::error::CompileResult;
use crate::layout::Layout;

/// Raw contents of an override document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideFile {
    basis_gates: Option<BasisGates>,
    coupling_map: Option<CouplingMap>,
    durations: Option<InstructionDurations>,
    device_properties: Option<BackendProperties>,
    timing_constraints: Option<TimingConstraints>,
    /// Physical qubit of each virtual qubit, in virtual order.
    initial_layout: Option<Vec<u32>>,
    layout_method: Option<String>,
    routing_method: Option<String>,
    translation_method: Option<String>,
    scheduling_method: Option<String>,
    approximation_degree: Option<f64>,
    seed: Option<u64>,
    unitary_synthesis_method: Option<String>,
    unitary_synthesis_plugin_config: Option<PluginConfig>,
}

impl OverrideFile {
    /// Parse a YAML or JSON document.
    pub fn from_yaml(source: &str) -> CompileResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Validate every field and convert to explicit overrides.
    pub fn into_partial_config(self) -> CompileResult<PartialConfig> {
        Ok(PartialConfig {
            basis_gates: self.basis_gates,
            inst_map: None,
            coupling_map: self.coupling_map,
            instruction_durations: self.durations,
            backend_properties: self.device_properties,
            timing_constraints: self.timing_constraints,
            initial_layout: self
                .initial_layout
                .as_deref()
                .map(Layout::from_physical)
                .transpose()?,
            layout_method: self.layout_method.as_deref().map(str::parse).transpose()?,
            routing_method: self.routing_method.as_deref().map(str::parse).transpose()?,
            translation_method: self.translation_method.as_deref().map(str::parse).transpose()?,
            scheduling_method: self.scheduling_method.as_deref().map(str::parse).transpose()?,
            approximation_degree: self
                .approximation_degree
                .map(ApproximationDegree::new)
                .transpose()?,
            seed: self.seed,
            unitary_synthesis_method: self
                .unitary_synthesis_method
                .as_deref()
                .map(str::parse)
                .transpose()?,
            unitary_synthesis_plugin_config: self.unitary_synthesis_plugin_config,
        })
    }
}

/// Parse and validate an override document in one step.
pub fn parse_overrides(source: &str) -> CompileResult<PartialConfig> {
    OverrideFile::from_yaml(source)?.into_partial_config()
}
