mod report;
mod samples;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use vfx_director::error_codes::{exit_code_for, CodedError, ErrorCode, ErrorEnvelope};
use vfx_director::{PlanGenerator, VocabularyCatalog};

use crate::report::{ExplainReport, PlanEnvelope, PlanText};
use crate::samples::{sample_prompt, sample_title, SAMPLE_PROMPTS};

#[derive(Debug, Parser)]
#[command(name = "vfxd")]
#[command(about = "VFX Director: scene prompt to VFX pipeline plan")]
#[command(version = env!("VFXD_BUILD_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a pipeline plan (prompt from argument, --sample, or stdin)
    Plan {
        #[arg(conflicts_with = "sample")]
        prompt: Option<String>,
        /// Use one of the built-in sample prompts (see `vfxd samples`)
        #[arg(long)]
        sample: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Vocabulary catalog YAML to use instead of the built-in one
        #[arg(long, env = "VFXD_CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// Show which cue resolved each metadata field
    Explain {
        #[arg(conflicts_with = "sample")]
        prompt: Option<String>,
        #[arg(long)]
        sample: Option<usize>,
        #[arg(long)]
        json: bool,
        #[arg(long, env = "VFXD_CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// List the sample prompts
    Samples,
    /// Inspect or validate vocabulary catalogs
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Debug, Subcommand)]
enum CatalogCommands {
    /// Print the built-in catalog as YAML
    Dump,
    /// Load and validate a catalog file
    Check { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl Commands {
    fn wants_json(&self) -> bool {
        match self {
            Self::Plan { format, .. } => *format == OutputFormat::Json,
            Self::Explain { json, .. } => *json,
            Self::Samples | Self::Catalog { .. } => false,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json_errors = cli.command.wants_json();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report_failure(&error, json_errors),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn report_failure(error: &anyhow::Error, json_errors: bool) -> ExitCode {
    if json_errors {
        match serde_json::to_string(&ErrorEnvelope::from_error(error)) {
            Ok(envelope) => eprintln!("{envelope}"),
            Err(_) => eprintln!("error: {error:#}"),
        }
    } else {
        eprintln!("error: {error:#}");
    }

    ExitCode::from(exit_code_for(error))
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Plan {
            prompt,
            sample,
            format,
            catalog,
        } => run_plan(prompt, sample, format, catalog.as_deref()),
        Commands::Explain {
            prompt,
            sample,
            json,
            catalog,
        } => run_explain(prompt, sample, json, catalog.as_deref()),
        Commands::Samples => {
            for (index, prompt) in SAMPLE_PROMPTS.iter().enumerate() {
                println!("[{index}] {}…", sample_title(prompt));
                println!("    {prompt}");
            }
            Ok(())
        }
        Commands::Catalog { command } => match command {
            CatalogCommands::Dump => {
                print!("{}", VocabularyCatalog::builtin().to_yaml()?);
                Ok(())
            }
            CatalogCommands::Check { path } => {
                let catalog = load_catalog(&path)?;
                println!(
                    "OK: {} ({} location, {} time, {} mood, {} camera, {} character, {} fx rules)",
                    path.display(),
                    catalog.location.rules.len(),
                    catalog.time_of_day.rules.len(),
                    catalog.mood.rules.len(),
                    catalog.camera_style.rules.len(),
                    catalog.characters.rules.len(),
                    catalog.fx_palette.rules.len(),
                );
                Ok(())
            }
        },
    }
}

fn run_plan(
    prompt: Option<String>,
    sample: Option<usize>,
    format: OutputFormat,
    catalog: Option<&Path>,
) -> Result<()> {
    let generator = build_generator(catalog)?;
    let prompt = resolve_prompt(prompt, sample)?;
    let plan = generator.generate(prompt.trim());
    tracing::info!(stages = plan.stages.len(), "generated pipeline plan");

    match format {
        OutputFormat::Text => print!("{}", PlanText(&plan)),
        OutputFormat::Json => {
            let envelope = PlanEnvelope {
                ok: true,
                fingerprint: plan.fingerprint()?,
                plan: &plan,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&envelope).context("failed to encode plan json")?
            );
        }
        OutputFormat::Yaml => {
            print!(
                "{}",
                serde_yaml::to_string(&plan).context("failed to encode plan yaml")?
            );
        }
    }
    Ok(())
}

fn run_explain(
    prompt: Option<String>,
    sample: Option<usize>,
    json: bool,
    catalog: Option<&Path>,
) -> Result<()> {
    let generator = build_generator(catalog)?;
    let prompt = resolve_prompt(prompt, sample)?;
    let report = ExplainReport::from_analysis(&generator.analyze(prompt.trim()));

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to encode explain json")?
        );
    } else {
        print!("{report}");
    }
    Ok(())
}

fn build_generator(catalog: Option<&Path>) -> Result<PlanGenerator> {
    match catalog {
        Some(path) => PlanGenerator::new(load_catalog(path)?),
        None => Ok(PlanGenerator::builtin()),
    }
}

fn load_catalog(path: &Path) -> Result<VocabularyCatalog> {
    let catalog = VocabularyCatalog::load(path).map_err(|error| {
        anyhow!(CodedError::new(ErrorCode::InvalidCatalog, format!("{error:#}"))
            .with_details(json!({ "path": path.display().to_string() })))
    })?;
    tracing::debug!(path = %path.display(), "loaded vocabulary catalog");
    Ok(catalog)
}

fn resolve_prompt(prompt: Option<String>, sample: Option<usize>) -> Result<String> {
    if let Some(prompt) = prompt {
        return Ok(prompt);
    }
    if let Some(index) = sample {
        return sample_prompt(index).map(ToOwned::to_owned);
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read scene prompt from stdin")?;
    Ok(buffer)
}
