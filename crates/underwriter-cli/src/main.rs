mod commands;
mod config;
mod input;
mod narrator;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::assess::AssessArgs;
use commands::report::{EntitiesArgs, ReportArgs, SeriesArgs};

/// Forensic credit underwriting diagnostics
#[derive(Parser)]
#[command(
    name = "uw",
    version,
    about = "Forensic credit underwriting diagnostics",
    long_about = "A CLI for screening borrowers from their financial statements with decimal \
                  precision. Derives liquidity, profitability, leverage and efficiency ratios, \
                  a distress index, earnings-quality flags and the cash-flow life-cycle stage, \
                  then composes a scored APPROVE / REVIEW / REJECT verdict."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML configuration file
    #[arg(long, global = true, env = "UW_CONFIG")]
    config: Option<String>,

    /// Log pipeline stages to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one borrower-year from flags, a file or stdin
    Assess(AssessArgs),
    /// Full credit report for one entity-year of a dataset
    Report(ReportArgs),
    /// Metrics for every fiscal year of one entity, most recent first
    Series(SeriesArgs),
    /// List borrowers and fiscal years in a dataset
    Entities(EntitiesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let config = config::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args, &config),
        Commands::Report(args) => commands::report::run_report(args, &config),
        Commands::Series(args) => commands::report::run_series(args),
        Commands::Entities(args) => commands::report::run_entities(args),
        Commands::Version => Ok(serde_json::json!({ "name": "uw", "version": env!("CARGO_PKG_VERSION") })),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if matches!(cli.command, Commands::Version) {
        println!("uw {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let format = cli.output.clone();
    match run(cli) {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
