use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use dashgen_core::config::{self, CONFIG_FILE_NAME, DashgenConfig};
use dashgen_core::error::WriteError;
use dashgen_core::ir::DashboardSpec;
use dashgen_core::parse;
use dashgen_core::transform::{self, TransformOptions};
use dashgen_core::{CodeGenerator, GeneratedFile};
use dashgen_react_query::{ReactQueryConfig, ReactQueryGenerator};

#[derive(Parser)]
#[command(
    name = "dashgen",
    about = "Scaffold a React admin dashboard from an OpenAPI 3.x schema",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Path to the OpenAPI schema (YAML or JSON) [default: ./schema.yaml]
    input: Option<PathBuf>,

    /// Output root for the generated sources [default: ./src]
    output: Option<PathBuf>,

    /// Config file to use instead of ./.dashgen.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List the files that would be written without writing them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dashboard scaffolding (the default command)
    Generate(GenerateArgs),

    /// Load and validate an OpenAPI schema
    Validate {
        /// Path to the OpenAPI schema [default: ./schema.yaml]
        input: Option<PathBuf>,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the resources and CRUD buckets found in a schema
    Inspect {
        /// Path to the OpenAPI schema [default: ./schema.yaml]
        input: Option<PathBuf>,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default .dashgen.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => cmd_generate(cli.generate),

        Some(Commands::Generate(args)) => cmd_generate(args),

        Some(Commands::Validate { input, config }) => cmd_validate(input, config),

        Some(Commands::Inspect {
            input,
            config,
            format,
        }) => cmd_inspect(input, config, format),

        Some(Commands::Init { force }) => cmd_init(force),

        Some(Commands::Completions { shell }) => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "dashgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load `--config` if given, else `./.dashgen.yaml` if present, else defaults.
fn resolve_config(path: Option<&Path>) -> Result<DashgenConfig> {
    match path {
        Some(path) => config::load_config(path)
            .map_err(|e| anyhow::anyhow!(e))?
            .with_context(|| format!("config file {} not found", path.display())),
        None => Ok(config::load_config(Path::new(CONFIG_FILE_NAME))
            .map_err(|e| anyhow::anyhow!(e))?
            .unwrap_or_default()),
    }
}

fn load_ir(input: &Path, cfg: &DashgenConfig) -> Result<DashboardSpec> {
    let parsed = parse::load(input)?;
    let ir = transform::transform(&parsed, &TransformOptions::from(cfg))?;
    Ok(ir)
}

/// Run the whole pipeline and return the files in emission order.
fn build_files(input: &Path, cfg: &DashgenConfig) -> Result<Vec<GeneratedFile>> {
    let ir = load_ir(input, cfg)?;
    let files = ReactQueryGenerator.generate(&ir, &ReactQueryConfig::from(cfg))?;
    Ok(files)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, WriteError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        eprintln!("  wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;
    let input = args.input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = args.output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let files = build_files(&input, &cfg)?;

    if args.dry_run {
        for file in &files {
            println!("{}", output.join(&file.path).display());
        }
        eprintln!("Dry run: {} files would be written", files.len());
        return Ok(());
    }

    eprintln!("Generating {} → {}", input.display(), output.display());
    let written = write_files(&output, &files)?;
    eprintln!(
        "Generated {} files in {}",
        written.len(),
        output.display()
    );
    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let cfg = resolve_config(config.as_deref())?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));

    let parsed = parse::load(&input)?;
    eprintln!(
        "Valid OpenAPI {} schema: {}",
        parsed.openapi, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());
    if let Some(ref components) = parsed.components {
        eprintln!("  Schemas: {}", components.schemas.len());
    }

    let ir = transform::transform(&parsed, &TransformOptions::from(&cfg))?;
    let operations: usize = ir.resources.iter().map(|r| r.operations.len()).sum();
    eprintln!("  Resources: {}", ir.resources.len());
    eprintln!("  Operations: {operations}");

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    format: InspectFormat,
) -> Result<()> {
    let cfg = resolve_config(config.as_deref())?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let ir = load_ir(&input, &cfg)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{yaml}");
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &DashboardSpec) -> serde_json::Value {
    let resources: Vec<serde_json::Value> = ir
        .resources
        .iter()
        .map(|resource| {
            let operations: Vec<serde_json::Value> = resource
                .operations
                .iter()
                .map(|op| {
                    serde_json::json!({
                        "name": op.function_name,
                        "method": op.method.as_str(),
                        "path": op.path,
                        "bucket": op.bucket.map(|b| b.as_str()),
                    })
                })
                .collect();
            serde_json::json!({
                "name": resource.name.original,
                "hook": format!("use{}", resource.name.pascal_case),
                "cache_key": resource.list_cache_key(),
                "model": resource.model.as_ref().map(|m| &m.name),
                "operations": operations,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "resources": resources,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
