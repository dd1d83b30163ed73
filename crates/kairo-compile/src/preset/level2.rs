//! Level 2: heavy optimization.

use super::{LayoutProbe, LevelPolicy, PipelineBuilder, stages};
use crate::config::PassManagerConfig;
use crate::level::OptimizationLevel;
use crate::method::{LayoutMethod, RoutingMethod, TranslationMethod};
use crate::pipeline::{PassSpec, Repeat, Stage, StageKind};

const POLICY: LevelPolicy = LevelPolicy {
    layout: LayoutMethod::Dense,
    routing: RoutingMethod::Stochastic,
    translation: TranslationMethod::Translator,
    probe: LayoutProbe::PerfectSearch {
        call_limit: 1_000,
        time_limit: 10,
    },
    stochastic_trials: 20,
    lookahead_depth: 5,
    lookahead_width: 5,
    sabre_heuristic: "decay",
    sabre_layout_iterations: 2,
};

/// Searches for a perfect layout and runs commutation-aware cancellation
/// until depth and size settle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Level2Builder;

impl PipelineBuilder for Level2Builder {
    fn level(&self) -> OptimizationLevel {
        OptimizationLevel::Level2
    }

    fn policy(&self) -> &LevelPolicy {
        &POLICY
    }

    fn optimization_stage(&self, config: &PassManagerConfig) -> Option<Stage> {
        let mut cancellation = PassSpec::transformation("CommutativeCancellation");
        if let Some(basis_gates) = &config.basis_gates {
            cancellation = cancellation.with_arg("basis_gates", stages::basis(basis_gates));
        }
        let passes = vec![stages::optimize_1q(config), cancellation];
        Some(
            Stage::new(StageKind::Optimization, passes)
                .repeat_until(Repeat::UntilDepthAndSizeFixed),
        )
    }
}

#[cfg(test)]
mod tests {
    use kairo_device::CouplingMap;
    use serde_json::json;

    use super::*;
    use crate::pipeline::Condition;

    #[test]
    fn test_perfect_search_then_dense() {
        let config = PassManagerConfig {
            coupling_map: Some(CouplingMap::linear(4)),
            seed: Some(11),
            ..Default::default()
        };
        let pipeline = Level2Builder.build(&config).unwrap();
        let layout = pipeline.stage(StageKind::Layout).unwrap();
        let csp = layout.pass("CSPLayout").unwrap();
        assert_eq!(csp.arg("call_limit"), Some(&json!(1_000)));
        assert_eq!(csp.arg("seed"), Some(&json!(11)));
        assert_eq!(
            layout.pass("DenseLayout").unwrap().condition(),
            Some(Condition::LayoutUnset)
        );
    }

    #[test]
    fn test_lookahead_parameters() {
        let config = PassManagerConfig {
            coupling_map: Some(CouplingMap::linear(4)),
            routing_method: Some(crate::method::RoutingMethod::Lookahead),
            ..Default::default()
        };
        let pipeline = Level2Builder.build(&config).unwrap();
        let swap = pipeline.find_pass("LookaheadSwap").unwrap();
        assert_eq!(swap.arg("search_depth"), Some(&json!(5)));
        assert_eq!(swap.arg("search_width"), Some(&json!(5)));
    }
}
