//! Kairo Compilation Configuration
//!
//! This crate turns a device description and an optimization level into a
//! concrete, ordered compilation [`Pipeline`]. It does not transform
//! circuits itself; it decides which passes should run, in which order,
//! with which parameters.
//!
//! # Flow
//!
//! ```text
//! PartialConfig ─┐
//! Target ────────┼─> ConfigResolver ─> PassManagerConfig ─> LevelDispatcher ─> PipelineBuilder ─> Pipeline
//! Backend ───────┘
//! ```
//!
//! - [`ConfigResolver`] fills the six device-derivable fields, first source
//!   wins: explicit override, then target, then backend.
//! - [`LevelDispatcher`] picks one of four [`PipelineBuilder`]s by
//!   [`OptimizationLevel`].
//! - Each builder emits `init -> layout -> routing -> translation ->
//!   optimization -> scheduling`, omitting stages with nothing to do.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use kairo_compile::{PartialConfig, StageKind, generate_pipeline};
//! use kairo_device::fake_target;
//!
//! let target = Arc::new(fake_target("fake_montreal").unwrap());
//! let pipeline = generate_pipeline(3, None, Some(target), PartialConfig::new()).unwrap();
//!
//! // Montreal ships calibrations, so the pipeline is scheduled.
//! assert!(pipeline.has_stage(StageKind::Scheduling));
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod level;
pub mod method;
pub mod overrides;
pub mod pipeline;
pub mod preset;
pub mod resolve;

use std::sync::Arc;

use tracing::instrument;

use kairo_device::{DeviceDescriptor, Target};

pub use config::{
    ApproximationDegree, DerivedField, FieldSource, PartialConfig, PassManagerConfig,
    PluginConfig, Provenance,
};
pub use dispatch::LevelDispatcher;
pub use error::{CompileError, CompileResult};
pub use layout::Layout;
pub use level::OptimizationLevel;
pub use method::{
    LayoutMethod, RoutingMethod, SchedulingMethod, TranslationMethod, UnitarySynthesisMethod,
};
pub use overrides::{OverrideFile, parse_overrides};
pub use pipeline::{Condition, PassKind, PassSpec, Pipeline, Repeat, Stage, StageKind};
pub use preset::{
    Level0Builder, Level1Builder, Level2Builder, Level3Builder, LevelPolicy, LayoutProbe,
    PipelineBuilder,
};
pub use resolve::ConfigResolver;

/// Resolve a configuration and build the preset pipeline for a level.
///
/// `overrides` holds every explicitly supplied field; fields it leaves
/// unset are derived from `target`, then from `backend`.
///
/// # Errors
///
/// - [`CompileError::InvalidLevel`] if `optimization_level` is not 0..=3.
/// - [`CompileError::UnresolvedRequirement`] if a stage needs a field no
///   source supplied.
/// - [`CompileError::InvalidLayout`] if the initial layout does not fit
///   the device.
#[instrument(skip(backend, target, overrides))]
pub fn generate_pipeline(
    optimization_level: i64,
    backend: Option<&dyn DeviceDescriptor>,
    target: Option<Arc<Target>>,
    overrides: PartialConfig,
) -> CompileResult<Pipeline> {
    let config = ConfigResolver::new().resolve(target, backend, overrides);
    LevelDispatcher::new().dispatch(optimization_level, &config)
}
