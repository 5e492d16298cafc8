//! Binary entry point for leadmatch.
//!
//! This binary provides the CLI interface for the lead deduplication engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Args, Parser, Subcommand};
use leadmatch::cli::{CheckCommand, DedupeCommand, KeysCommand, format_keys, format_verdict};
use leadmatch::observability::{self, InitOptions, ObservabilityConfig};
use leadmatch::{Lead, LeadmatchConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code reported by `check` when the lead is a duplicate.
const EXIT_DUPLICATE: u8 = 2;

/// Leadmatch - entity resolution for law-firm outreach leads.
#[derive(Parser)]
#[command(name = "leadmatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Similarity threshold for fuzzy matches, in [0, 1].
    #[arg(long, global = true)]
    threshold: Option<String>,

    /// Print Prometheus metrics to stderr on exit.
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Check whether one lead is already known.
    Check {
        /// File with the known leads (.json, .ndjson, .csv).
        #[arg(short, long)]
        existing: PathBuf,

        #[command(flatten)]
        lead: LeadArgs,
    },

    /// Split a batch of new leads into unique and duplicate.
    Dedupe {
        /// File with the known leads; none when omitted.
        #[arg(short, long)]
        existing: Option<PathBuf>,

        /// File with the new leads.
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the unique leads; stdout (JSON) when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where to write a JSON report of the duplicates.
        #[arg(short, long)]
        duplicates: Option<PathBuf>,
    },

    /// Show the normalized comparison keys of a lead.
    Keys {
        #[command(flatten)]
        lead: LeadArgs,
    },
}

/// Identity fields of a lead given on the command line.
#[derive(Args)]
struct LeadArgs {
    /// Firm name.
    #[arg(long)]
    firm: Option<String>,

    /// Attorney name.
    #[arg(long)]
    attorney: Option<String>,

    /// Attorney email.
    #[arg(long)]
    email: Option<String>,

    /// Attorney phone.
    #[arg(long)]
    phone: Option<String>,

    /// Firm website.
    #[arg(long)]
    website: Option<String>,
}

impl LeadArgs {
    fn into_lead(self) -> Lead {
        Lead {
            firm_name: self.firm,
            attorney_name: self.attorney,
            attorney_email: self.email,
            attorney_phone: self.phone,
            firm_website: self.website,
            ..Lead::default()
        }
    }
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let observability_config = ObservabilityConfig::from_config(
        &config,
        InitOptions {
            verbose: cli.verbose,
            metrics: cli.metrics,
        },
    );
    let observability = match observability::init(&observability_config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    let result = run_command(cli.command, &config);

    if cli.metrics {
        if let Some(rendered) = observability.render_metrics() {
            eprint!("{rendered}");
        }
    }

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<LeadmatchConfig, Box<dyn std::error::Error>> {
    let config = LeadmatchConfig::load(cli.config.as_deref())?;

    match &cli.threshold {
        Some(threshold) => Ok(config.with_threshold_arg(threshold)?),
        None => Ok(config),
    }
}

/// Runs the selected command.
fn run_command(
    command: Commands,
    config: &LeadmatchConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::Check { existing, lead } => cmd_check(existing, lead, config),

        Commands::Dedupe {
            existing,
            input,
            output,
            duplicates,
        } => cmd_dedupe(existing, input, output, duplicates, config),

        Commands::Keys { lead } => cmd_keys(lead),
    }
}

/// Check command.
fn cmd_check(
    existing: PathBuf,
    lead: LeadArgs,
    config: &LeadmatchConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let candidate = lead.into_lead();
    let result = CheckCommand::new(existing, config.dedup.clone()).run(&candidate)?;

    println!("{}", format_verdict(&candidate, &result));

    Ok(if result.is_duplicate {
        ExitCode::from(EXIT_DUPLICATE)
    } else {
        ExitCode::SUCCESS
    })
}

/// Dedupe command.
fn cmd_dedupe(
    existing: Option<PathBuf>,
    input: PathBuf,
    output: Option<PathBuf>,
    duplicates: Option<PathBuf>,
    config: &LeadmatchConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let to_stdout = output.is_none();
    let command = DedupeCommand {
        existing,
        input,
        output,
        duplicates,
        config: config.dedup.clone(),
    };
    let summary = command.run()?;

    if to_stdout {
        println!("{}", serde_json::to_string_pretty(&summary.unique)?);
        eprintln!("{summary}");
    } else {
        println!("{summary}");
    }

    Ok(ExitCode::SUCCESS)
}

/// Keys command.
fn cmd_keys(lead: LeadArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let keys = KeysCommand::new().run(&lead.into_lead());
    println!("{}", format_keys(&keys));
    Ok(ExitCode::SUCCESS)
}
