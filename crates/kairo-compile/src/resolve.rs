//! Configuration resolution.
//!
//! The resolver merges explicit overrides with device-derived values. Each
//! of the six derivable fields is resolved independently, first source
//! wins:
//!
//! 1. the explicit override,
//! 2. the target descriptor,
//! 3. the backend descriptor,
//! 4. nothing (the field stays unset).
//!
//! A descriptor is only asked for a field when every higher layer left it
//! absent. All other fields pass through from the overrides unchanged.

use std::sync::Arc;

use tracing::{debug, instrument};

use kairo_device::{DeviceDescriptor, Target};

use crate::config::{DerivedField, FieldSource, PartialConfig, PassManagerConfig, Provenance};

/// Layered merge of overrides, target and backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve a configuration.
    ///
    /// Never fails: validation of the result is up to the pipeline builders.
    #[instrument(
        skip_all,
        fields(
            target = target.as_deref().map(|t| t.name()),
            backend = backend.map(|b| b.name()),
        )
    )]
    pub fn resolve(
        &self,
        target: Option<Arc<Target>>,
        backend: Option<&dyn DeviceDescriptor>,
        explicit: PartialConfig,
    ) -> PassManagerConfig {
        let mut layers = Layers {
            target: target.as_deref().map(|t| t as &dyn DeviceDescriptor),
            backend,
            provenance: Provenance::default(),
        };

        let coupling_map =
            layers.pick(DerivedField::Connectivity, explicit.coupling_map, |d| d.coupling_map());
        let basis_gates =
            layers.pick(DerivedField::BasisGates, explicit.basis_gates, |d| d.operation_names());
        let instruction_durations = layers.pick(
            DerivedField::Durations,
            explicit.instruction_durations,
            |d| d.durations(),
        );
        let inst_map = layers.pick(DerivedField::CalibrationMap, explicit.inst_map, |d| {
            d.instruction_schedule_map()
        });
        let timing_constraints = layers.pick(
            DerivedField::TimingConstraints,
            explicit.timing_constraints,
            |d| d.timing_constraints(),
        );
        let backend_properties = layers.pick(
            DerivedField::DeviceProperties,
            explicit.backend_properties,
            |d| d.properties(),
        );
        let provenance = layers.provenance;

        PassManagerConfig {
            target,
            basis_gates,
            inst_map,
            coupling_map,
            instruction_durations,
            backend_properties,
            timing_constraints,
            initial_layout: explicit.initial_layout,
            layout_method: explicit.layout_method,
            routing_method: explicit.routing_method,
            translation_method: explicit.translation_method,
            scheduling_method: explicit.scheduling_method,
            approximation_degree: explicit.approximation_degree,
            seed: explicit.seed,
            unitary_synthesis_method: explicit.unitary_synthesis_method.unwrap_or_default(),
            unitary_synthesis_plugin_config: explicit.unitary_synthesis_plugin_config,
            provenance,
        }
    }
}

struct Layers<'a> {
    target: Option<&'a dyn DeviceDescriptor>,
    backend: Option<&'a dyn DeviceDescriptor>,
    provenance: Provenance,
}

impl<'a> Layers<'a> {
    fn pick<T>(
        &mut self,
        field: DerivedField,
        explicit: Option<T>,
        derive: impl Fn(&'a dyn DeviceDescriptor) -> Option<T>,
    ) -> Option<T> {
        let (value, source) = if let Some(value) = explicit {
            (Some(value), FieldSource::Explicit)
        } else if let Some(value) = self.target.and_then(&derive) {
            (Some(value), FieldSource::Target)
        } else if let Some(value) = self.backend.and_then(&derive) {
            (Some(value), FieldSource::Backend)
        } else {
            (None, FieldSource::Unset)
        };
        debug!(field = %field, source = %source, "Resolved derived field");
        self.provenance.record(field, source);
        value
    }
}
