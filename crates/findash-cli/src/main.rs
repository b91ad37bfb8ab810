mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use commands::dashboard::ShowArgs;
use config::DashboardConfig;
use findash_core::{build_derived_table, DerivedTable};

/// Monthly financial dashboard
#[derive(Parser)]
#[command(
    name = "findash",
    version,
    about = "Monthly financial dashboard metrics",
    long_about = "Loads a table of monthly financial figures, derives profit, margin and \
                  budget ratios with month-over-month changes, and renders the dashboard \
                  tiles and donut charts for a selected month."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the monthly CSV table (otherwise piped stdin, then the config)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Path to a YAML or JSON config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Net profit margin target, in percent
    #[arg(long, global = true, allow_hyphen_values = true)]
    target_margin: Option<f64>,

    /// Fail when a percent change is not finite
    #[arg(long, global = true)]
    strict: bool,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable months in fiscal order
    Months,
    /// Print every derived metric and percent change for every month
    Table,
    /// Render the dashboard for one month
    Show(ShowArgs),
    /// Describe the available metrics
    Metrics,
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
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let base = match cli.config {
        Some(ref path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    let config = base.with_overrides(cli.target_margin, cli.strict);
    config.validate()?;
    Ok(config)
}

/// Resolve the config and build the derived table once; the table is
/// read-only from here on.
fn prepare(cli: &Cli) -> Result<(DashboardConfig, DerivedTable), Box<dyn std::error::Error>> {
    let config = load_config(cli)?;
    let table = load_table(cli, &config)?;
    Ok((config, table))
}

fn load_table(
    cli: &Cli,
    config: &DashboardConfig,
) -> Result<DerivedTable, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let source = input::load_source(cli.data.as_deref(), config)?;
    let table = build_derived_table(&source, config.target_margin)?;
    if config.strict {
        table.ensure_finite()?;
    }
    for warning in table.warnings() {
        tracing::warn!("{}", warning);
    }
    tracing::info!(
        months = table.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "dashboard ready"
    );
    Ok(table)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Months => prepare(&cli).and_then(|(config, table)| {
            commands::dashboard::run_months(&config, &table)
        }),
        Commands::Table => prepare(&cli).and_then(|(config, table)| {
            commands::dashboard::run_table(&config, &table)
        }),
        Commands::Show(ref args) => prepare(&cli).and_then(|(config, table)| {
            commands::dashboard::run_show(args, &config, &table)
        }),
        Commands::Metrics => commands::dashboard::run_metrics(),
        Commands::Version => {
            println!("findash {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
