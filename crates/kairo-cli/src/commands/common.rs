//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use kairo_compile::{ApproximationDegree, Layout, PartialConfig, parse_overrides};

/// Load an override file.
pub fn load_overrides(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let overrides = parse_overrides(&source)
        .with_context(|| format!("Invalid override file: {}", path.display()))?;

    debug!(path = %path.display(), "Loaded override file");
    Ok(overrides)
}

/// Method and parameter flags as given on the command line.
#[derive(Debug, Default)]
pub struct FlagOverrides<'a> {
    pub layout_method: Option<&'a str>,
    pub routing_method: Option<&'a str>,
    pub translation_method: Option<&'a str>,
    pub scheduling_method: Option<&'a str>,
    pub unitary_synthesis_method: Option<&'a str>,
    pub initial_layout: Option<&'a [u32]>,
    pub approximation_degree: Option<f64>,
    pub seed: Option<u64>,
}

impl FlagOverrides<'_> {
    /// Validate the flags and convert them to explicit overrides.
    pub fn into_partial_config(self) -> Result<PartialConfig> {
        Ok(PartialConfig {
            layout_method: self.layout_method.map(str::parse).transpose()?,
            routing_method: self.routing_method.map(str::parse).transpose()?,
            translation_method: self.translation_method.map(str::parse).transpose()?,
            scheduling_method: self.scheduling_method.map(str::parse).transpose()?,
            unitary_synthesis_method: self.unitary_synthesis_method.map(str::parse).transpose()?,
            initial_layout: self.initial_layout.map(Layout::from_physical).transpose()?,
            approximation_degree: self
                .approximation_degree
                .map(ApproximationDegree::new)
                .transpose()?,
            seed: self.seed,
            ..PartialConfig::default()
        })
    }
}
