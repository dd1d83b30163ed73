//! CLI argument parsing and override-file tests.
//!
//! The CLI is a binary crate, so these tests mirror its clap definitions
//! and exercise the same library calls the commands make.

// ============================================================================
// Argument parsing
// ============================================================================

mod arg_parsing {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum DescriptorKind {
        Target,
        Backend,
        Both,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum OutputFormat {
        Table,
        Json,
        Yaml,
    }

    #[derive(Parser)]
    #[command(name = "kairo")]
    struct Cli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        Pipeline {
            #[arg(short, long)]
            device: String,
            #[arg(long, value_enum, default_value_t = DescriptorKind::Target)]
            descriptor: DescriptorKind,
            #[arg(short = 'O', long, default_value = "1", allow_negative_numbers = true)]
            optimization_level: i64,
            #[arg(short, long)]
            config: Option<PathBuf>,
            #[arg(long)]
            layout_method: Option<String>,
            #[arg(long, value_delimiter = ',')]
            initial_layout: Option<Vec<u32>>,
            #[arg(long)]
            seed: Option<u64>,
            #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
            format: OutputFormat,
        },
        Devices,
        Version,
    }

    #[test]
    fn test_pipeline_defaults() {
        let cli = Cli::try_parse_from(["kairo", "pipeline", "--device", "fake_london"]).unwrap();
        match cli.command {
            Commands::Pipeline {
                device,
                descriptor,
                optimization_level,
                config,
                format,
                ..
            } => {
                assert_eq!(device, "fake_london");
                assert_eq!(descriptor, DescriptorKind::Target);
                assert_eq!(optimization_level, 1);
                assert!(config.is_none());
                assert_eq!(format, OutputFormat::Table);
            }
            _ => panic!("expected pipeline command"),
        }
    }

    #[test]
    fn test_pipeline_all_flags() {
        let cli = Cli::try_parse_from([
            "kairo",
            "-vv",
            "pipeline",
            "-d",
            "fake_montreal",
            "--descriptor",
            "both",
            "-O",
            "3",
            "--config",
            "overrides.yaml",
            "--layout-method",
            "sabre",
            "--initial-layout",
            "3,1,4",
            "--seed",
            "9",
            "--format",
            "yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Pipeline {
                descriptor,
                optimization_level,
                config,
                layout_method,
                initial_layout,
                seed,
                format,
                ..
            } => {
                assert_eq!(descriptor, DescriptorKind::Both);
                assert_eq!(optimization_level, 3);
                assert_eq!(config, Some(PathBuf::from("overrides.yaml")));
                assert_eq!(layout_method.as_deref(), Some("sabre"));
                assert_eq!(initial_layout, Some(vec![3, 1, 4]));
                assert_eq!(seed, Some(9));
                assert_eq!(format, OutputFormat::Yaml);
            }
            _ => panic!("expected pipeline command"),
        }
    }

    #[test]
    fn test_out_of_range_level_reaches_the_library() {
        // Level validation belongs to the dispatcher, not to clap.
        let cli =
            Cli::try_parse_from(["kairo", "pipeline", "-d", "fake_london", "-O", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Pipeline { optimization_level: 7, .. }
        ));
        let cli =
            Cli::try_parse_from(["kairo", "pipeline", "-d", "fake_london", "-O", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Pipeline { optimization_level: -1, .. }
        ));
    }

    #[test]
    fn test_device_is_required() {
        assert!(Cli::try_parse_from(["kairo", "pipeline"]).is_err());
    }

    #[test]
    fn test_unknown_descriptor_kind() {
        let result = Cli::try_parse_from([
            "kairo",
            "pipeline",
            "-d",
            "fake_london",
            "--descriptor",
            "hybrid",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_simple_subcommands() {
        assert!(matches!(
            Cli::try_parse_from(["kairo", "devices"]).unwrap().command,
            Commands::Devices
        ));
        assert!(matches!(
            Cli::try_parse_from(["kairo", "version"]).unwrap().command,
            Commands::Version
        ));
    }
}

// ============================================================================
// Override files
// ============================================================================

mod override_files {
    use std::fs;

    use kairo_compile::{
        CompileError, LayoutMethod, PartialConfig, RoutingMethod, parse_overrides,
    };
    use tempfile::TempDir;

    /// Equivalent to commands::common::load_overrides
    fn load_overrides(path: &std::path::Path) -> anyhow::Result<PartialConfig> {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        let source = fs::read_to_string(path)?;
        Ok(parse_overrides(&source)?)
    }

    #[test]
    fn test_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("overrides.yaml");
        fs::write(&path, "layout_method: dense\nseed: 3\n").unwrap();

        let overrides = load_overrides(&path).unwrap();
        assert_eq!(overrides.layout_method, Some(LayoutMethod::Dense));
        assert_eq!(overrides.seed, Some(3));
    }

    #[test]
    fn test_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("overrides.json");
        fs::write(&path, r#"{"routing_method": "basic"}"#).unwrap();

        let overrides = load_overrides(&path).unwrap();
        assert_eq!(overrides.routing_method, Some(RoutingMethod::Basic));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_overrides(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_bad_selector_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("overrides.yaml");
        fs::write(&path, "routing_method: teleport\n").unwrap();

        let err = load_overrides(&path).unwrap_err();
        let err = err.downcast::<CompileError>().unwrap();
        assert!(matches!(err, CompileError::UnsupportedMethod { .. }));
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("overrides.yaml");
        fs::write(&path, "layout_method: dense\nseed: 3\n").unwrap();

        let file = load_overrides(&path).unwrap();
        let flags = PartialConfig::new().with_layout_method(LayoutMethod::Sabre);
        let merged = file.overlay(flags);
        assert_eq!(merged.layout_method, Some(LayoutMethod::Sabre));
        assert_eq!(merged.seed, Some(3));
    }
}

// ============================================================================
// Pipeline resolution as the command performs it
// ============================================================================

mod pipeline_resolution {
    use std::sync::Arc;

    use kairo_compile::{
        ConfigResolver, DerivedField, FieldSource, LevelDispatcher, PartialConfig, StageKind,
    };
    use kairo_device::{DeviceDescriptor, fake_record};

    #[test]
    fn test_both_descriptors_prefer_target() {
        let record = fake_record("fake_montreal").unwrap();
        let backend = record.backend().unwrap();
        let target = Arc::new(record.target().unwrap());

        let config = ConfigResolver::new().resolve(
            Some(target),
            Some(&backend as &dyn DeviceDescriptor),
            PartialConfig::new(),
        );
        for (_, source) in config.provenance.iter() {
            assert_eq!(source, FieldSource::Target);
        }
        let pipeline = LevelDispatcher::new().dispatch(3, &config).unwrap();
        assert!(pipeline.has_stage(StageKind::Scheduling));
    }

    #[test]
    fn test_backend_variant_of_london() {
        let record = fake_record("fake_london").unwrap();
        let backend = record.backend().unwrap();
        let config = ConfigResolver::new().resolve(
            None,
            Some(&backend as &dyn DeviceDescriptor),
            PartialConfig::new(),
        );
        assert_eq!(
            config.provenance.source(DerivedField::CalibrationMap),
            FieldSource::Unset
        );
        let pipeline = LevelDispatcher::new().dispatch(0, &config).unwrap();
        assert!(!pipeline.has_stage(StageKind::Scheduling));
    }

    #[test]
    fn test_pipeline_renders_as_json() {
        let record = fake_record("fake_london_v2").unwrap();
        let target = Arc::new(record.target().unwrap());
        let config = ConfigResolver::new().resolve(Some(target), None, PartialConfig::new());
        let pipeline = LevelDispatcher::new().dispatch(1, &config).unwrap();

        let json = serde_json::to_value(&pipeline).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["stages"][0]["kind"], "init");
    }

    #[test]
    fn test_unknown_device() {
        let err = fake_record("fake_tokyo").unwrap_err();
        assert!(err.to_string().contains("fake_london"));
    }
}
