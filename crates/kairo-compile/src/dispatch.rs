//! Optimization-level dispatch.

use tracing::{info, instrument};

use crate::config::PassManagerConfig;
use crate::error::CompileResult;
use crate::level::OptimizationLevel;
use crate::pipeline::Pipeline;
use crate::preset::{Level0Builder, Level1Builder, Level2Builder, Level3Builder, PipelineBuilder};

/// Maps an optimization level to its preset builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelDispatcher;

impl LevelDispatcher {
    /// Create a dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// The builder serving a level.
    pub fn builder(&self, level: OptimizationLevel) -> &'static dyn PipelineBuilder {
        match level {
            OptimizationLevel::Level0 => &Level0Builder,
            OptimizationLevel::Level1 => &Level1Builder,
            OptimizationLevel::Level2 => &Level2Builder,
            OptimizationLevel::Level3 => &Level3Builder,
        }
    }

    /// Build the pipeline for a raw level value.
    ///
    /// Fails with [`CompileError::InvalidLevel`](crate::CompileError::InvalidLevel)
    /// for values outside 0..=3. Any other error comes from the builder.
    #[instrument(skip(self, config))]
    pub fn dispatch(&self, level: i64, config: &PassManagerConfig) -> CompileResult<Pipeline> {
        let level = OptimizationLevel::try_from(level)?;
        let pipeline = self.builder(level).build(config)?;
        info!(
            level = %level,
            stages = ?pipeline.stage_kinds(),
            "Dispatched preset pipeline"
        );
        Ok(pipeline)
    }
}
