//! Pipeline descriptions.
//!
//! A [`Pipeline`] is the output of a preset builder: an ordered list of
//! [`Stage`]s, each an ordered list of [`PassSpec`]s. It is purely
//! descriptive. Nothing here touches a circuit; a pass manager executes the
//! pipeline later.
//!
//! Pipelines compare structurally, so two builds from equal configurations
//! at the same level are `==`.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::level::OptimizationLevel;

/// The compilation phase a stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Circuit preparation before placement.
    Init,
    /// Initial virtual-to-physical placement.
    Layout,
    /// SWAP insertion.
    Routing,
    /// Rewriting into the device basis.
    Translation,
    /// Optimization loop.
    Optimization,
    /// Instruction timing.
    Scheduling,
}

impl StageKind {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Layout => "layout",
            Self::Routing => "routing",
            Self::Translation => "translation",
            Self::Optimization => "optimization",
            Self::Scheduling => "scheduling",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Reads the circuit and records properties.
    Analysis,
    /// Rewrites the circuit.
    Transformation,
}

/// Property-set guard evaluated when the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// No layout has been chosen yet.
    LayoutUnset,
    /// The trivial layout needs at least one SWAP.
    TrivialLayoutImperfect,
    /// Some two-qubit gate acts on non-adjacent qubits.
    NotMapped,
    /// Some two-qubit gate runs against the allowed edge direction.
    DirectionMismatch,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LayoutUnset => "layout_unset",
            Self::TrivialLayoutImperfect => "trivial_layout_imperfect",
            Self::NotMapped => "not_mapped",
            Self::DirectionMismatch => "direction_mismatch",
        })
    }
}

/// Fixed-point criterion of a repeated stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Repeat until circuit depth stops changing.
    UntilDepthFixed,
    /// Repeat until both depth and size stop changing.
    UntilDepthAndSizeFixed,
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UntilDepthFixed => "until_depth_fixed",
            Self::UntilDepthAndSizeFixed => "until_depth_and_size_fixed",
        })
    }
}

/// One configured pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassSpec {
    name: &'static str,
    kind: PassKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    args: Map<String, Value>,
}

impl PassSpec {
    /// An analysis pass with no arguments.
    pub fn analysis(name: &'static str) -> Self {
        Self::new(name, PassKind::Analysis)
    }

    /// A transformation pass with no arguments.
    pub fn transformation(name: &'static str) -> Self {
        Self::new(name, PassKind::Transformation)
    }

    fn new(name: &'static str, kind: PassKind) -> Self {
        Self {
            name,
            kind,
            condition: None,
            args: Map::new(),
        }
    }

    /// Set an argument.
    #[must_use]
    pub fn with_arg(mut self, key: &str, value: Value) -> Self {
        self.args.insert(key.to_string(), value);
        self
    }

    /// Guard the pass with a runtime condition.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Pass name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Pass kind.
    pub fn kind(&self) -> PassKind {
        self.kind
    }

    /// Runtime guard, if any.
    pub fn condition(&self) -> Option<Condition> {
        self.condition
    }

    /// All arguments.
    pub fn args(&self) -> &Map<String, Value> {
        &self.args
    }

    /// One argument.
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }
}

/// An ordered group of passes belonging to one phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    kind: StageKind,
    passes: Vec<PassSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repeat: Option<Repeat>,
}

impl Stage {
    /// Create a stage that runs once.
    pub fn new(kind: StageKind, passes: Vec<PassSpec>) -> Self {
        Self {
            kind,
            passes,
            repeat: None,
        }
    }

    /// Repeat the stage until a fixed point.
    #[must_use]
    pub fn repeat_until(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Stage kind.
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Passes in execution order.
    pub fn passes(&self) -> &[PassSpec] {
        &self.passes
    }

    /// Fixed-point criterion, if the stage loops.
    pub fn repeat(&self) -> Option<Repeat> {
        self.repeat
    }

    /// Pass names in execution order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(PassSpec::name).collect()
    }

    /// First pass with the given name.
    pub fn pass(&self, name: &str) -> Option<&PassSpec> {
        self.passes.iter().find(|p| p.name == name)
    }
}

/// The ordered stages produced for one configuration and level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipeline {
    level: OptimizationLevel,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(level: OptimizationLevel, stages: Vec<Stage>) -> Self {
        Self { level, stages }
    }

    /// Level the pipeline was built for.
    pub fn level(&self) -> OptimizationLevel {
        self.level
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// First stage of a kind.
    pub fn stage(&self, kind: StageKind) -> Option<&Stage> {
        self.stages.iter().find(|s| s.kind == kind)
    }

    /// Whether a stage of this kind is present.
    pub fn has_stage(&self, kind: StageKind) -> bool {
        self.stage(kind).is_some()
    }

    /// Stage kinds in execution order.
    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(Stage::kind).collect()
    }

    /// Every pass, flattened across stages.
    pub fn passes(&self) -> impl Iterator<Item = &PassSpec> + '_ {
        self.stages.iter().flat_map(|s| s.passes.iter())
    }

    /// First pass with the given name, in any stage.
    pub fn find_pass(&self, name: &str) -> Option<&PassSpec> {
        self.passes().find(|p| p.name == name)
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Total number of passes.
    pub fn num_passes(&self) -> usize {
        self.stages.iter().map(|s| s.passes.len()).sum()
    }
}
