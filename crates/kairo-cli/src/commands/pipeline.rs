//! Pipeline command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;

use kairo_compile::{
    ConfigResolver, LevelDispatcher, PartialConfig, PassKind, PassManagerConfig, Pipeline,
};
use kairo_device::{DeviceDescriptor, DeviceRecord, LegacyBackend, Target, fake_record};

use super::common::{FlagOverrides, load_overrides};

/// Which descriptor variant(s) of a fake device to resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DescriptorKind {
    /// Structured target only.
    Target,
    /// Legacy backend only.
    Backend,
    /// Both; the target takes precedence.
    Both,
}

/// How to print the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Options of the pipeline command.
#[derive(Debug)]
pub struct PipelineOptions {
    pub device: String,
    pub descriptor: DescriptorKind,
    pub optimization_level: i64,
    pub config: Option<PathBuf>,
    pub layout_method: Option<String>,
    pub routing_method: Option<String>,
    pub translation_method: Option<String>,
    pub scheduling_method: Option<String>,
    pub unitary_synthesis_method: Option<String>,
    pub initial_layout: Option<Vec<u32>>,
    pub approximation_degree: Option<f64>,
    pub seed: Option<u64>,
    pub format: OutputFormat,
}

impl PipelineOptions {
    /// Explicit overrides: flags on top of the override file.
    fn overrides(&self) -> Result<PartialConfig> {
        let file = match &self.config {
            Some(path) => load_overrides(path)?,
            None => PartialConfig::default(),
        };
        let flags = FlagOverrides {
            layout_method: self.layout_method.as_deref(),
            routing_method: self.routing_method.as_deref(),
            translation_method: self.translation_method.as_deref(),
            scheduling_method: self.scheduling_method.as_deref(),
            unitary_synthesis_method: self.unitary_synthesis_method.as_deref(),
            initial_layout: self.initial_layout.as_deref(),
            approximation_degree: self.approximation_degree,
            seed: self.seed,
        }
        .into_partial_config()?;
        Ok(file.overlay(flags))
    }
}

fn descriptors(
    record: &DeviceRecord,
    kind: DescriptorKind,
) -> Result<(Option<LegacyBackend>, Option<Arc<Target>>)> {
    let backend = match kind {
        DescriptorKind::Backend | DescriptorKind::Both => Some(record.backend()?),
        DescriptorKind::Target => None,
    };
    let target = match kind {
        DescriptorKind::Target | DescriptorKind::Both => Some(Arc::new(record.target()?)),
        DescriptorKind::Backend => None,
    };
    Ok((backend, target))
}

/// Execute the pipeline command.
pub fn execute(options: &PipelineOptions) -> Result<()> {
    let record = fake_record(&options.device)?;
    let overrides = options.overrides()?;
    let (backend, target) = descriptors(record, options.descriptor)?;

    let config = ConfigResolver::new().resolve(
        target,
        backend.as_ref().map(|b| b as &dyn DeviceDescriptor),
        overrides,
    );
    let pipeline = LevelDispatcher::new()
        .dispatch(options.optimization_level, &config)
        .with_context(|| format!("Failed to build pipeline for {}", record.name))?;

    match options.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pipeline)?),
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&pipeline)?),
        OutputFormat::Table => print_table(record, &config, &pipeline),
    }

    Ok(())
}

fn print_table(record: &DeviceRecord, config: &PassManagerConfig, pipeline: &Pipeline) {
    println!(
        "{} Pipeline for {} (level {})",
        style("→").cyan().bold(),
        style(record.name).green(),
        style(pipeline.level()).yellow()
    );

    println!("\n  Resolved fields:");
    for (field, source) in config.provenance.iter() {
        println!("    {:<20} {}", field.as_str(), style(source).dim());
    }

    for (index, stage) in pipeline.stages().iter().enumerate() {
        let repeat = stage
            .repeat()
            .map(|r| format!(" (repeat {r})"))
            .unwrap_or_default();
        println!(
            "\n  {} {}{}",
            style(format!("[{}]", index + 1)).dim(),
            style(stage.kind()).bold(),
            repeat
        );
        for pass in stage.passes() {
            let marker = match pass.kind() {
                PassKind::Analysis => style("○").blue(),
                PassKind::Transformation => style("●").green(),
            };
            let condition = pass
                .condition()
                .map(|c| format!(" if {c}"))
                .unwrap_or_default();
            println!("    {marker} {}{}", pass.name(), style(condition).dim());
        }
    }

    println!(
        "\n{} {} stages, {} passes",
        style("✓").green().bold(),
        pipeline.len(),
        pipeline.num_passes()
    );
}
