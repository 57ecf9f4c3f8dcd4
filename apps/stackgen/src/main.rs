//! stackgen - synthesize the translation pipeline into a CloudFormation template.
//!
//! # Usage
//!
//! ```text
//! stackgen synth --env prod --config translate.json
//! stackgen synth --output -          # template to stdout
//! stackgen ls                        # resources in deployment order
//! stackgen validate
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STACKGEN_ENV` | `dev` | Target environment |
//! | `STACKGEN_REGION` / `AWS_REGION` | `us-east-1` | Target region, part of derived bucket names |
//! | `STACKGEN_ACCOUNT` | *(unset)* | Target account |
//! | `STACKGEN_OUTDIR` | `stackgen.out` | Output directory |
//! | `INPUT_BUCKET_NAME`, `OUTPUT_BUCKET_NAME` | *(derived)* | Bucket names |
//! | `SOURCE_LANGUAGE`, `TARGET_LANGUAGE` | `auto`, `es` | Languages |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Logs go to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stackgen_core::StackgenConfig;
use stackgen_synth::Stack;
use stackgen_translate::{TranslationStackProps, build_translation_stack};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// `--output` value that writes the template to stdout.
const STDOUT: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "stackgen", version)]
#[command(about = "Synthesize the S3 to Lambda translation pipeline into CloudFormation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Target environment (overrides STACKGEN_ENV)
    #[arg(short, long, global = true)]
    env: Option<String>,

    /// JSON file with stack props
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the template and asset manifest
    Synth {
        /// Output directory, or `-` for the template on stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List resources in deployment order
    Ls,
    /// Build and synthesize without writing anything
    Validate,
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Build the stack from configuration, the props file, and props variables.
fn load_stack(config: &StackgenConfig, props_file: Option<&Path>) -> Result<Stack> {
    let env = config
        .deployment_env()
        .context("invalid deployment environment")?;

    let props = match props_file {
        Some(path) => TranslationStackProps::from_file(path)?,
        None => TranslationStackProps::default(),
    }
    .apply_env();

    build_translation_stack(&env, &props)
        .with_context(|| format!("cannot build translation stack for {}", env.name))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = StackgenConfig::from_env();
    if let Some(env) = cli.env {
        config.environment = env;
    }
    init_tracing(&config.log_level)?;

    let stack = load_stack(&config, cli.config.as_deref())?;

    match cli.command {
        Command::Synth { output } => {
            let output = output.unwrap_or_else(|| config.outdir.clone());
            if output == STDOUT {
                let template = stackgen_synth::to_template_json(&stack)
                    .with_context(|| format!("cannot synthesize {}", stack.name()))?;
                std::io::stdout()
                    .write_all(template.as_bytes())
                    .context("cannot write template to stdout")?;
            } else {
                let written = stackgen_synth::write_to(&stack, Path::new(&output))
                    .with_context(|| format!("cannot write {} to {output}", stack.name()))?;
                println!("{}", written.template_path.display());
                println!("{}", written.assets_path.display());
            }
        }
        Command::Ls => {
            let template = stack
                .synthesize()
                .with_context(|| format!("cannot synthesize {}", stack.name()))?;
            let order = stackgen_synth::DependencyGraph::from_template(&template)?
                .deployment_order()?;
            let mut out = std::io::stdout().lock();
            for id in order {
                let resource_type = template
                    .resources
                    .get(&id)
                    .map_or("", |r| r.resource_type.as_str());
                writeln!(out, "{id}\t{resource_type}").context("cannot write to stdout")?;
            }
        }
        Command::Validate => {
            let template = stack
                .synthesize()
                .with_context(|| format!("cannot synthesize {}", stack.name()))?;
            info!(stack = stack.name(), "stack is valid");
            println!(
                "{}: {} resources, {} outputs",
                stack.name(),
                template.resources.len(),
                template.outputs.len()
            );
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_synth_to_stdout() {
        let cli = Cli::try_parse_from(["stackgen", "synth", "--output", "-", "--env", "prod"]).unwrap();
        assert_eq!(cli.env.as_deref(), Some("prod"));
        assert!(matches!(cli.command, Command::Synth { output: Some(ref o) } if o == STDOUT));
    }

    #[test]
    fn test_should_accept_global_options_before_subcommand() {
        let cli = Cli::try_parse_from(["stackgen", "--config", "props.json", "ls"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("props.json")));
        assert!(matches!(cli.command, Command::Ls));
    }

    #[test]
    fn test_should_require_subcommand() {
        assert!(Cli::try_parse_from(["stackgen"]).is_err());
    }

    #[test]
    fn test_should_reject_invalid_environment() {
        let config = StackgenConfig::builder().environment("Prod_1".into()).build();
        assert!(load_stack(&config, None).is_err());
    }

    #[test]
    fn test_should_report_missing_props_file() {
        let config = StackgenConfig::default();
        let err = load_stack(&config, Some(Path::new("/nonexistent/props.json"))).unwrap_err();
        assert!(err.to_string().contains("props"));
    }
}
