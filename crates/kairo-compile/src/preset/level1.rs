//! Level 1: light optimization.

use super::{LayoutProbe, LevelPolicy, PipelineBuilder, stages};
use crate::config::PassManagerConfig;
use crate::level::OptimizationLevel;
use crate::method::{LayoutMethod, RoutingMethod, TranslationMethod};
use crate::pipeline::{PassSpec, Repeat, Stage, StageKind};

const POLICY: LevelPolicy = LevelPolicy {
    layout: LayoutMethod::Dense,
    routing: RoutingMethod::Stochastic,
    translation: TranslationMethod::Translator,
    probe: LayoutProbe::Trivial,
    stochastic_trials: 20,
    lookahead_depth: 4,
    lookahead_width: 4,
    sabre_heuristic: "lookahead",
    sabre_layout_iterations: 2,
};

/// Keeps the trivial layout when it is perfect and cancels adjacent
/// inverse gates until depth stops shrinking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Level1Builder;

impl PipelineBuilder for Level1Builder {
    fn level(&self) -> OptimizationLevel {
        OptimizationLevel::Level1
    }

    fn policy(&self) -> &LevelPolicy {
        &POLICY
    }

    fn optimization_stage(&self, config: &PassManagerConfig) -> Option<Stage> {
        let passes = vec![
            stages::optimize_1q(config),
            PassSpec::transformation("CXCancellation"),
        ];
        Some(Stage::new(StageKind::Optimization, passes).repeat_until(Repeat::UntilDepthFixed))
    }
}

#[cfg(test)]
mod tests {
    use kairo_device::CouplingMap;

    use super::*;

    #[test]
    fn test_explicit_method_skips_trivial_probe() {
        let config = PassManagerConfig {
            coupling_map: Some(CouplingMap::linear(4)),
            layout_method: Some(LayoutMethod::Sabre),
            ..Default::default()
        };
        let pipeline = Level1Builder.build(&config).unwrap();
        let layout = pipeline.stage(StageKind::Layout).unwrap();
        assert_eq!(layout.pass_names()[0], "SabreLayout");
        assert!(layout.pass("Layout2qDistance").is_none());
        assert_eq!(layout.pass("SabreLayout").unwrap().condition(), None);
    }

    #[test]
    fn test_optimization_loop() {
        let pipeline = Level1Builder.build(&PassManagerConfig::default()).unwrap();
        let stage = pipeline.stage(StageKind::Optimization).unwrap();
        assert_eq!(stage.repeat(), Some(Repeat::UntilDepthFixed));
        assert_eq!(
            stage.pass_names(),
            vec!["Optimize1qGatesDecomposition", "CXCancellation"]
        );
    }
}
