use anyhow::Result;
use clap::{Parser, Subcommand};
use kestrel_cli::commands;
use kestrel_cli::{DeviceStrategy, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for running PageSpeed Insights audits and exporting client-ready reports",
    long_about = "Kestrel runs a Lighthouse audit for a URL through the PageSpeed Insights API, \
                  extracts the findings worth acting on, and renders them to the terminal or a \
                  styled spreadsheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a PageSpeed audit against a live URL
    Audit {
        /// Target URL (https is assumed when no scheme is given)
        #[arg(value_name = "URL")]
        url: String,

        /// Device strategy for the Lighthouse run
        #[arg(long, value_enum, default_value = "mobile")]
        strategy: DeviceStrategy,

        /// Google API key; optional, sent only to the API
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,

        /// Additional Lighthouse category to request (repeatable)
        #[arg(long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Write a styled xlsx report to this path
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// Save the raw API response for offline re-runs with `report`
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Build a report from a saved API response file
    Report {
        /// Path to a saved PageSpeed response (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write a styled xlsx report to this path
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Audit {
            url,
            strategy,
            api_key,
            timeout,
            categories,
            export,
            save,
        } => commands::audit::execute(
            &url,
            strategy,
            api_key.as_deref(),
            timeout,
            categories,
            export.as_deref(),
            save.as_deref(),
            cli.format,
        ),
        Commands::Report { file, export } => {
            commands::report::execute(&file, export.as_deref(), cli.format)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("kestrel=debug,kestrel_core=debug,kestrel_client=debug,kestrel_export=debug")
    } else {
        EnvFilter::new("kestrel=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
