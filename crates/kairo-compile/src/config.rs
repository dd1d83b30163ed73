//! Explicit overrides and the resolved pass-manager configuration.
//!
//! [`PartialConfig`] is what a caller hands in: any subset of fields, each
//! either set or absent. [`PassManagerConfig`] is what pipeline builders
//! consume: the same fields after the resolver has filled device-derivable
//! ones from a target or backend. Its [`Provenance`] records where each of
//! those six fields came from.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use kairo_device::{
    BackendProperties, BasisGates, CouplingMap, DeviceDescriptor, InstructionDurations,
    InstructionScheduleMap, Target, TimingConstraints,
};

use crate::error::{CompileError, CompileResult};
use crate::layout::Layout;
use crate::method::{
    LayoutMethod, RoutingMethod, SchedulingMethod, TranslationMethod, UnitarySynthesisMethod,
};

/// Opaque configuration forwarded to a unitary-synthesis plugin.
pub type PluginConfig = Map<String, Value>;

/// Approximation tolerance of unitary synthesis, in `[0, 1]`.
///
/// `1.0` requests exact synthesis.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ApproximationDegree(f64);

impl ApproximationDegree {
    /// Exact synthesis.
    pub const EXACT: Self = Self(1.0);

    /// Validate a degree. NaN and values outside `[0, 1]` are rejected.
    pub fn new(degree: f64) -> CompileResult<Self> {
        if (0.0..=1.0).contains(&degree) {
            Ok(Self(degree))
        } else {
            Err(CompileError::InvalidApproximationDegree(degree))
        }
    }

    /// The raw value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ApproximationDegree {
    type Error = CompileError;

    fn try_from(degree: f64) -> CompileResult<Self> {
        Self::new(degree)
    }
}

/// A field the resolver can derive from a device descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedField {
    /// Connectivity graph.
    Connectivity,
    /// Basis gate set.
    BasisGates,
    /// Duration table.
    Durations,
    /// Calibration schedule map.
    CalibrationMap,
    /// Timing constraints.
    TimingConstraints,
    /// Error and coherence table.
    DeviceProperties,
}

impl DerivedField {
    /// Every derived field.
    pub const ALL: [Self; 6] = [
        Self::Connectivity,
        Self::BasisGates,
        Self::Durations,
        Self::CalibrationMap,
        Self::TimingConstraints,
        Self::DeviceProperties,
    ];

    /// Parameter name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::BasisGates => "basis_gates",
            Self::Durations => "durations",
            Self::CalibrationMap => "calibration_map",
            Self::TimingConstraints => "timing_constraints",
            Self::DeviceProperties => "device_properties",
        }
    }
}

impl fmt::Display for DerivedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which input supplied a derived field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Caller override.
    Explicit,
    /// Structured target descriptor.
    Target,
    /// Legacy backend descriptor.
    Backend,
    /// No source.
    #[default]
    Unset,
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit",
            Self::Target => "target",
            Self::Backend => "backend",
            Self::Unset => "unset",
        })
    }
}

/// Source of every derived field of a resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Provenance(BTreeMap<DerivedField, FieldSource>);

impl Provenance {
    /// Source of a field; [`FieldSource::Unset`] if never recorded.
    pub fn source(&self, field: DerivedField) -> FieldSource {
        self.0.get(&field).copied().unwrap_or_default()
    }

    pub(crate) fn record(&mut self, field: DerivedField, source: FieldSource) {
        self.0.insert(field, source);
    }

    /// `(field, source)` pairs for every derived field.
    pub fn iter(&self) -> impl Iterator<Item = (DerivedField, FieldSource)> + '_ {
        DerivedField::ALL.into_iter().map(|f| (f, self.source(f)))
    }
}

/// Caller-supplied overrides.
///
/// Absent fields are `None`. Device-derivable fields left `None` are filled
/// by the resolver; the rest pass through unchanged.
///
/// ```
/// use kairo_compile::{LayoutMethod, PartialConfig};
/// use kairo_device::BasisGates;
///
/// let overrides = PartialConfig::new()
///     .with_basis_gates(BasisGates::new(["rz", "sx", "cx"]))
///     .with_layout_method(LayoutMethod::Sabre)
///     .with_seed(42);
/// assert_eq!(overrides.seed, Some(42));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialConfig {
    /// Basis gate set.
    pub basis_gates: Option<BasisGates>,
    /// Calibration schedule map.
    pub inst_map: Option<InstructionScheduleMap>,
    /// Connectivity graph.
    pub coupling_map: Option<CouplingMap>,
    /// Duration table.
    pub instruction_durations: Option<InstructionDurations>,
    /// Error and coherence table.
    pub backend_properties: Option<BackendProperties>,
    /// Timing constraints.
    pub timing_constraints: Option<TimingConstraints>,
    /// Initial virtual-to-physical placement.
    pub initial_layout: Option<Layout>,
    /// Layout method.
    pub layout_method: Option<LayoutMethod>,
    /// Routing method.
    pub routing_method: Option<RoutingMethod>,
    /// Translation method.
    pub translation_method: Option<TranslationMethod>,
    /// Scheduling method.
    pub scheduling_method: Option<SchedulingMethod>,
    /// Approximation degree.
    pub approximation_degree: Option<ApproximationDegree>,
    /// Random seed for stochastic passes.
    pub seed: Option<u64>,
    /// Unitary synthesis method. `None` means the default decomposer.
    pub unitary_synthesis_method: Option<UnitarySynthesisMethod>,
    /// Plugin configuration for unitary synthesis.
    pub unitary_synthesis_plugin_config: Option<PluginConfig>,
}

impl PartialConfig {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the basis gate set.
    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Set the calibration schedule map.
    #[must_use]
    pub fn with_inst_map(mut self, inst_map: InstructionScheduleMap) -> Self {
        self.inst_map = Some(inst_map);
        self
    }

    /// Set the connectivity graph.
    #[must_use]
    pub fn with_coupling_map(mut self, coupling_map: CouplingMap) -> Self {
        self.coupling_map = Some(coupling_map);
        self
    }

    /// Set the duration table.
    #[must_use]
    pub fn with_instruction_durations(mut self, durations: InstructionDurations) -> Self {
        self.instruction_durations = Some(durations);
        self
    }

    /// Set the error and coherence table.
    #[must_use]
    pub fn with_backend_properties(mut self, properties: BackendProperties) -> Self {
        self.backend_properties = Some(properties);
        self
    }

    /// Set the timing constraints.
    #[must_use]
    pub fn with_timing_constraints(mut self, timing: TimingConstraints) -> Self {
        self.timing_constraints = Some(timing);
        self
    }

    /// Set the initial layout.
    #[must_use]
    pub fn with_initial_layout(mut self, layout: Layout) -> Self {
        self.initial_layout = Some(layout);
        self
    }

    /// Set the layout method.
    #[must_use]
    pub fn with_layout_method(mut self, method: LayoutMethod) -> Self {
        self.layout_method = Some(method);
        self
    }

    /// Set the routing method.
    #[must_use]
    pub fn with_routing_method(mut self, method: RoutingMethod) -> Self {
        self.routing_method = Some(method);
        self
    }

    /// Set the translation method.
    #[must_use]
    pub fn with_translation_method(mut self, method: TranslationMethod) -> Self {
        self.translation_method = Some(method);
        self
    }

    /// Set the scheduling method.
    #[must_use]
    pub fn with_scheduling_method(mut self, method: SchedulingMethod) -> Self {
        self.scheduling_method = Some(method);
        self
    }

    /// Set the approximation degree.
    #[must_use]
    pub fn with_approximation_degree(mut self, degree: ApproximationDegree) -> Self {
        self.approximation_degree = Some(degree);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the unitary synthesis method.
    #[must_use]
    pub fn with_unitary_synthesis_method(mut self, method: UnitarySynthesisMethod) -> Self {
        self.unitary_synthesis_method = Some(method);
        self
    }

    /// Set the unitary synthesis plugin configuration.
    #[must_use]
    pub fn with_unitary_synthesis_plugin_config(mut self, config: PluginConfig) -> Self {
        self.unitary_synthesis_plugin_config = Some(config);
        self
    }

    /// Layer `higher` on top of `self`: every field set in `higher` wins.
    #[must_use]
    pub fn overlay(self, higher: PartialConfig) -> Self {
        Self {
            basis_gates: higher.basis_gates.or(self.basis_gates),
            inst_map: higher.inst_map.or(self.inst_map),
            coupling_map: higher.coupling_map.or(self.coupling_map),
            instruction_durations: higher.instruction_durations.or(self.instruction_durations),
            backend_properties: higher.backend_properties.or(self.backend_properties),
            timing_constraints: higher.timing_constraints.or(self.timing_constraints),
            initial_layout: higher.initial_layout.or(self.initial_layout),
            layout_method: higher.layout_method.or(self.layout_method),
            routing_method: higher.routing_method.or(self.routing_method),
            translation_method: higher.translation_method.or(self.translation_method),
            scheduling_method: higher.scheduling_method.or(self.scheduling_method),
            approximation_degree: higher.approximation_degree.or(self.approximation_degree),
            seed: higher.seed.or(self.seed),
            unitary_synthesis_method: higher
                .unitary_synthesis_method
                .or(self.unitary_synthesis_method),
            unitary_synthesis_plugin_config: higher
                .unitary_synthesis_plugin_config
                .or(self.unitary_synthesis_plugin_config),
        }
    }
}

/// Fully resolved configuration consumed by pipeline builders.
///
/// Produced by [`ConfigResolver::resolve`](crate::ConfigResolver::resolve).
/// Device-derivable fields that are still `None` had no source at all.
#[derive(Debug, Clone, Default)]
pub struct PassManagerConfig {
    /// Structured target, if one was supplied.
    pub target: Option<Arc<Target>>,
    /// Basis gate set.
    pub basis_gates: Option<BasisGates>,
    /// Calibration schedule map.
    pub inst_map: Option<InstructionScheduleMap>,
    /// Connectivity graph.
    pub coupling_map: Option<CouplingMap>,
    /// Duration table.
    pub instruction_durations: Option<InstructionDurations>,
    /// Error and coherence table.
    pub backend_properties: Option<BackendProperties>,
    /// Timing constraints.
    pub timing_constraints: Option<TimingConstraints>,
    /// Initial virtual-to-physical placement.
    pub initial_layout: Option<Layout>,
    /// Layout method.
    pub layout_method: Option<LayoutMethod>,
    /// Routing method.
    pub routing_method: Option<RoutingMethod>,
    /// Translation method.
    pub translation_method: Option<TranslationMethod>,
    /// Scheduling method.
    pub scheduling_method: Option<SchedulingMethod>,
    /// Approximation degree.
    pub approximation_degree: Option<ApproximationDegree>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Unitary synthesis method.
    pub unitary_synthesis_method: UnitarySynthesisMethod,
    /// Unitary synthesis plugin configuration.
    pub unitary_synthesis_plugin_config: Option<PluginConfig>,
    /// Source of each derived field.
    pub provenance: Provenance,
}

impl PassManagerConfig {
    /// Whether a non-empty calibration map is present.
    pub fn has_calibrations(&self) -> bool {
        self.inst_map.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Timing constraints that actually restrict alignment.
    pub fn active_timing_constraints(&self) -> Option<TimingConstraints> {
        self.timing_constraints.filter(|t| !t.is_unconstrained())
    }

    /// Physical qubit count implied by the connectivity graph or target.
    pub fn num_physical_qubits(&self) -> Option<u32> {
        self.coupling_map
            .as_ref()
            .map(CouplingMap::num_qubits)
            .or_else(|| self.target.as_ref().map(|t| t.num_qubits()))
    }

    /// Check the fields for mutual consistency.
    ///
    /// The initial layout must fit on the device.
    pub fn validate(&self) -> CompileResult<()> {
        let (Some(layout), Some(num_qubits)) = (&self.initial_layout, self.num_physical_qubits())
        else {
            return Ok(());
        };
        if layout.len() > num_qubits as usize {
            return Err(CompileError::InvalidLayout(format!(
                "{} virtual qubits cannot be placed on {num_qubits} physical qubits",
                layout.len()
            )));
        }
        layout.check_fits(num_qubits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximation_degree_bounds() {
        assert_eq!(ApproximationDegree::new(0.0).unwrap().value(), 0.0);
        assert_eq!(ApproximationDegree::new(1.0).unwrap(), ApproximationDegree::EXACT);
        for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ApproximationDegree::new(bad),
                Err(CompileError::InvalidApproximationDegree(_))
            ));
        }
    }

    #[test]
    fn test_overlay_prefers_higher_layer() {
        let file = PartialConfig::new()
            .with_seed(1)
            .with_routing_method(RoutingMethod::Basic);
        let flags = PartialConfig::new().with_seed(2);
        let merged = file.overlay(flags);
        assert_eq!(merged.seed, Some(2));
        assert_eq!(merged.routing_method, Some(RoutingMethod::Basic));
    }

    #[test]
    fn test_provenance_defaults_to_unset() {
        let mut provenance = Provenance::default();
        provenance.record(DerivedField::BasisGates, FieldSource::Explicit);
        assert_eq!(provenance.source(DerivedField::BasisGates), FieldSource::Explicit);
        assert_eq!(provenance.source(DerivedField::Durations), FieldSource::Unset);
        assert_eq!(provenance.iter().count(), 6);
    }

    #[test]
    fn test_validate_layout_against_device() {
        let mut config = PassManagerConfig {
            coupling_map: Some(CouplingMap::linear(3)),
            initial_layout: Some(Layout::from_physical(&[0, 2]).unwrap()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.initial_layout = Some(Layout::from_physical(&[0, 3]).unwrap());
        assert!(matches!(config.validate(), Err(CompileError::InvalidLayout(_))));

        config.initial_layout = Some(Layout::from_pairs([(0, 0), (1, 1), (2, 2), (3, 1_000)]).unwrap());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("4 virtual qubits"));
    }

    #[test]
    fn test_validate_without_device_accepts_any_layout() {
        let config = PassManagerConfig {
            initial_layout: Some(Layout::from_physical(&[40]).unwrap()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_active_timing_constraints() {
        let mut config = PassManagerConfig {
            timing_constraints: Some(TimingConstraints::default()),
            ..Default::default()
        };
        assert!(config.active_timing_constraints().is_none());
        config.timing_constraints = Some(TimingConstraints {
            granularity: 16,
            ..TimingConstraints::default()
        });
        assert_eq!(config.active_timing_constraints().unwrap().granularity, 16);
    }
}
