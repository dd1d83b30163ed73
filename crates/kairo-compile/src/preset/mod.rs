//! Preset pipeline builders, one per optimization level.
//!
//! Every builder produces stages in the same fixed order and differs only
//! in its [`LevelPolicy`] (default methods and router parameters), its
//! init-stage extras, and its optimization loop:
//!
//! ```text
//! init -> layout -> routing -> translation -> optimization -> scheduling
//! ```
//!
//! Stages that have nothing to do for the resolved configuration are
//! omitted. A stage that is needed but lacks a required field fails with
//! [`CompileError::UnresolvedRequirement`](crate::CompileError::UnresolvedRequirement).

mod level0;
mod level1;
mod level2;
mod level3;
pub(crate) mod stages;

pub use level0::Level0Builder;
pub use level1::Level1Builder;
pub use level2::Level2Builder;
pub use level3::Level3Builder;

use tracing::debug;

use crate::config::PassManagerConfig;
use crate::error::CompileResult;
use crate::level::OptimizationLevel;
use crate::method::{LayoutMethod, RoutingMethod, TranslationMethod};
use crate::pipeline::{PassSpec, Pipeline, Stage};

/// How a builder looks for a layout before running its default method.
///
/// Only used when the caller did not pick a layout method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutProbe {
    /// Run the default method directly.
    None,
    /// Try the trivial layout and keep it if it needs no SWAPs.
    Trivial,
    /// Bounded search for a perfect subgraph isomorphism.
    PerfectSearch {
        /// Maximum recursive calls.
        call_limit: u32,
        /// Wall-clock limit in seconds.
        time_limit: u32,
    },
}

/// Level-specific defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPolicy {
    /// Layout method when none is given.
    pub layout: LayoutMethod,
    /// Routing method when none is given.
    pub routing: RoutingMethod,
    /// Translation method when none is given.
    pub translation: TranslationMethod,
    /// Layout probe.
    pub probe: LayoutProbe,
    /// Stochastic swap trials.
    pub stochastic_trials: u32,
    /// Lookahead swap search depth.
    pub lookahead_depth: u32,
    /// Lookahead swap search width.
    pub lookahead_width: u32,
    /// Sabre swap heuristic.
    pub sabre_heuristic: &'static str,
    /// Sabre layout forward-backward iterations.
    pub sabre_layout_iterations: u32,
}

/// Builds the pipeline for one optimization level.
pub trait PipelineBuilder: Send + Sync {
    /// The level this builder serves.
    fn level(&self) -> OptimizationLevel;

    /// Defaults applied when the configuration leaves a method unset.
    fn policy(&self) -> &LevelPolicy;

    /// Passes appended to the init stage after 3+-qubit decomposition.
    fn init_passes(&self) -> Vec<PassSpec> {
        vec![]
    }

    /// The optimization stage, if this level has one.
    fn optimization_stage(&self, config: &PassManagerConfig) -> Option<Stage>;

    /// Build the pipeline.
    fn build(&self, config: &PassManagerConfig) -> CompileResult<Pipeline> {
        config.validate()?;
        stages::warn_ignored_plugin_config(config);
        let policy = self.policy();

        let mut pipeline = vec![stages::init(self.init_passes())];
        pipeline.extend(stages::layout(config, policy)?);
        pipeline.extend(stages::routing(config, policy)?);
        pipeline.extend(stages::translation(config, policy)?);
        pipeline.extend(self.optimization_stage(config));
        pipeline.extend(stages::scheduling(config)?);

        let pipeline = Pipeline::new(self.level(), pipeline);
        debug!(
            level = %self.level(),
            stages = pipeline.len(),
            passes = pipeline.num_passes(),
            "Built preset pipeline"
        );
        Ok(pipeline)
    }
}
