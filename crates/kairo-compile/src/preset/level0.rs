//! Level 0: no optimization.

use super::{LayoutProbe, LevelPolicy, PipelineBuilder};
use crate::config::PassManagerConfig;
use crate::level::OptimizationLevel;
use crate::method::{LayoutMethod, RoutingMethod, TranslationMethod};
use crate::pipeline::Stage;

const POLICY: LevelPolicy = LevelPolicy {
    layout: LayoutMethod::Trivial,
    routing: RoutingMethod::Stochastic,
    translation: TranslationMethod::Translator,
    probe: LayoutProbe::None,
    stochastic_trials: 20,
    lookahead_depth: 2,
    lookahead_width: 2,
    sabre_heuristic: "basic",
    sabre_layout_iterations: 1,
};

/// Only the stages the device requires: placement, routing, translation
/// and, when needed, scheduling.
#[derive(Debug, Clone, Copy, Default)]
pub struct Level0Builder;

impl PipelineBuilder for Level0Builder {
    fn level(&self) -> OptimizationLevel {
        OptimizationLevel::Level0
    }

    fn policy(&self) -> &LevelPolicy {
        &POLICY
    }

    fn optimization_stage(&self, _config: &PassManagerConfig) -> Option<Stage> {
        None
    }
}
