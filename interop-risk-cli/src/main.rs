//! Interop-risk CLI - command-line scoring of deployment scenarios

#![deny(warnings)]

// Global invariants enforced:
// - Results go to stdout, diagnostics to stderr
// - Out-of-range parameters never cause a non-zero exit

use anyhow::Context;
use clap::{Parser, Subcommand};
use interop_risk_core::report::{
    render_scenario_json, render_scenario_text, render_validated_json, ScenarioReport,
};
use interop_risk_core::{evaluate_validated, load_and_resolve, parse_override, validate_parameters};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "interop-risk")]
#[command(about = "Deployment risk scoring for healthcare AI and interoperability systems")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a deployment scenario
    Evaluate {
        #[command(flatten)]
        input: ScenarioArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the scenario parameters after validation
    Validate {
        #[command(flatten)]
        input: ScenarioArgs,
    },
}

#[derive(clap::Args)]
struct ScenarioArgs {
    /// Path to a scenario JSON file (default: discover in current directory)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override a parameter, e.g. --set w_impl=0.5 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Evaluate { input, format } => {
            let scenario = resolve_scenario(&input)?;
            let params = validate_parameters(&scenario.parameters);
            let result = evaluate_validated(&params);

            let report = ScenarioReport {
                scenario: scenario.name.as_deref(),
                description: scenario.description.as_deref(),
                result: &result,
            };
            match format {
                OutputFormat::Text => {
                    print!("{}", render_scenario_text(&report));
                }
                OutputFormat::Json => {
                    println!("{}", render_scenario_json(&report));
                }
            }
        }
        Commands::Validate { input } => {
            let scenario = resolve_scenario(&input)?;
            let params = validate_parameters(&scenario.parameters);
            println!("{}", render_validated_json(&params));
        }
    }

    Ok(())
}

/// Load the scenario file (explicit or discovered) and apply overrides
fn resolve_scenario(input: &ScenarioArgs) -> anyhow::Result<interop_risk_core::ResolvedScenario> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    let mut scenario = load_and_resolve(&cwd, input.scenario.as_deref())?;
    match &scenario.source_path {
        Some(path) => tracing::info!(path = %path.display(), "using scenario"),
        None => tracing::info!("no scenario file found, using defaults and overrides"),
    }

    let overrides = input
        .overrides
        .iter()
        .map(|s| parse_override(s))
        .collect::<anyhow::Result<Vec<_>>>()?;
    scenario.apply_overrides(&overrides)?;

    Ok(scenario)
}

/// Install the stderr subscriber; RUST_LOG takes precedence over -v
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "interop_risk_core=debug,interop_risk=debug",
        _ => "interop_risk_core=trace,interop_risk=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
