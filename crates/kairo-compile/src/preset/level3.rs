//! Level 3: heaviest optimization.

use super::{LayoutProbe, LevelPolicy, PipelineBuilder, stages};
use crate::config::PassManagerConfig;
use crate::level::OptimizationLevel;
use crate::method::{LayoutMethod, RoutingMethod, TranslationMethod};
use crate::pipeline::{PassSpec, Repeat, Stage, StageKind};

const POLICY: LevelPolicy = LevelPolicy {
    layout: LayoutMethod::Sabre,
    routing: RoutingMethod::Sabre,
    translation: TranslationMethod::Translator,
    probe: LayoutProbe::PerfectSearch {
        call_limit: 10_000,
        time_limit: 60,
    },
    stochastic_trials: 200,
    lookahead_depth: 5,
    lookahead_width: 6,
    sabre_heuristic: "decay",
    sabre_layout_iterations: 4,
};

/// Strips redundant operations before placement and resynthesizes
/// two-qubit blocks in the optimization loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Level3Builder;

impl PipelineBuilder for Level3Builder {
    fn level(&self) -> OptimizationLevel {
        OptimizationLevel::Level3
    }

    fn policy(&self) -> &LevelPolicy {
        &POLICY
    }

    fn init_passes(&self) -> Vec<PassSpec> {
        vec![
            PassSpec::transformation("RemoveResetInZeroState"),
            PassSpec::transformation("OptimizeSwapBeforeMeasure"),
            PassSpec::transformation("RemoveDiagonalGatesBeforeMeasure"),
        ]
    }

    fn optimization_stage(&self, config: &PassManagerConfig) -> Option<Stage> {
        let mut passes = vec![PassSpec::analysis("Collect2qBlocks")];
        let consolidate = PassSpec::transformation("ConsolidateBlocks");
        passes.push(match &config.basis_gates {
            Some(basis_gates) => consolidate.with_arg("basis_gates", stages::basis(basis_gates)),
            None => consolidate,
        });
        if let Some(basis_gates) = &config.basis_gates {
            passes.push(stages::unitary_synthesis(config, basis_gates, None));
        }
        passes.push(stages::optimize_1q(config));
        passes.push(PassSpec::transformation("CommutativeCancellation"));
        Some(
            Stage::new(StageKind::Optimization, passes)
                .repeat_until(Repeat::UntilDepthAndSizeFixed),
        )
    }
}
