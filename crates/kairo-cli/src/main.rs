//! Kairo Command-Line Interface
//!
//! Resolve preset compilation pipelines for the bundled fake devices.
//!
//! ```text
//! kairo pipeline --device fake_montreal --optimization-level 3
//! kairo pipeline --device fake_london --descriptor backend --format json
//! kairo devices
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::pipeline::{DescriptorKind, OutputFormat, PipelineOptions};
use commands::{devices, pipeline, version};

/// Kairo - preset compilation pipelines for quantum devices
#[derive(Parser)]
#[command(name = "kairo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the compilation pipeline for a device
    Pipeline {
        /// Fake device name (fake_london, fake_montreal)
        #[arg(short, long, env = "KAIRO_DEVICE")]
        device: String,

        /// Which descriptor variant(s) to hand to the resolver
        #[arg(long, value_enum, default_value_t = DescriptorKind::Target)]
        descriptor: DescriptorKind,

        /// Optimization level (0-3)
        #[arg(short = 'O', long, default_value = "1", allow_negative_numbers = true)]
        optimization_level: i64,

        /// YAML or JSON override file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Layout method (trivial, dense, noise_adaptive, sabre)
        #[arg(long)]
        layout_method: Option<String>,

        /// Routing method (basic, lookahead, stochastic, sabre, none)
        #[arg(long)]
        routing_method: Option<String>,

        /// Translation method (unroller, translator, synthesis)
        #[arg(long)]
        translation_method: Option<String>,

        /// Scheduling method (alap, asap)
        #[arg(long)]
        scheduling_method: Option<String>,

        /// Unitary synthesis method (default or a plugin name)
        #[arg(long)]
        unitary_synthesis_method: Option<String>,

        /// Initial layout: physical qubit of each virtual qubit, comma separated
        #[arg(long, value_delimiter = ',')]
        initial_layout: Option<Vec<u32>>,

        /// Approximation degree in [0, 1]
        #[arg(long)]
        approximation_degree: Option<f64>,

        /// Seed for stochastic passes
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the bundled fake devices
    Devices,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Pipeline {
            device,
            descriptor,
            optimization_level,
            config,
            layout_method,
            routing_method,
            translation_method,
            scheduling_method,
            unitary_synthesis_method,
            initial_layout,
            approximation_degree,
            seed,
            format,
        } => pipeline::execute(&PipelineOptions {
            device,
            descriptor,
            optimization_level,
            config,
            layout_method,
            routing_method,
            translation_method,
            scheduling_method,
            unitary_synthesis_method,
            initial_layout,
            approximation_degree,
            seed,
            format,
        }),

        Commands::Devices => devices::execute(),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
