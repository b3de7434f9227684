//! CLI entry point for the bikeshare explorer.
//!
//! Provides subcommands for exploring trip data interactively, printing a
//! one-shot statistics report, and listing the registered datasets.

mod interactive;

use anyhow::{Context, Result};
use bikeshare_explorer::{
    filter::{DayFilter, MonthFilter},
    loader::{LoadOptions, TimestampPolicy, load_and_filter},
    output::{print_pretty, to_json, write_report, write_rows},
    preview,
    registry::{City, DatasetRegistry},
    stats::StatsReport,
};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::interactive::Session;

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Directory holding the city CSV files (default: $BIKESHARE_DATA_DIR or ".")
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file overriding the CSV location of individual cities
    #[arg(long, global = true, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Drop rows with an unparseable start time instead of failing the load
    #[arg(long, global = true, default_value_t = false)]
    skip_bad_timestamps: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively choose a city, month and day, then browse statistics
    Explore,
    /// Print statistics for one selection and exit
    Stats {
        /// City to analyze: chicago, "new york" or washington
        #[arg(short, long)]
        city: City,

        /// Month name, or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// Weekday name, or "all"
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        /// Number of five-row preview pages to print before the statistics
        #[arg(short, long, default_value_t = 0)]
        preview: usize,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List registered datasets and where they are read from
    ListDatasets,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays quiet by default so prompts are readable
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(log_filter("RUST_LOG", LevelFilter::WARN));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(log_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let registry = build_registry(&cli.data)?;
    let options = LoadOptions {
        timestamps: if cli.data.skip_bad_timestamps {
            TimestampPolicy::Skip
        } else {
            TimestampPolicy::Reject
        },
    };

    match cli.command {
        Commands::Explore => {
            let stdin = io::stdin();
            Session::new(stdin.lock(), io::stdout(), &registry, options).run()?;
        }
        Commands::Stats {
            city,
            month,
            day,
            preview: pages,
            json,
        } => {
            let table = load_and_filter(&registry, city, month, day, options)
                .with_context(|| format!("loading {city} trips"))?;
            let report = StatsReport::compute(&table);
            print_pretty(&report);

            let mut out = io::stdout().lock();
            if json {
                writeln!(out, "{}", to_json(&report)?)?;
            } else {
                for page in 0..pages {
                    let rows = preview::page(&table, page);
                    write_rows(&mut out, &table.schema, rows)?;
                    if rows.len() < preview::PAGE_SIZE {
                        break;
                    }
                }
                write_report(&mut out, &report)?;
            }
        }
        Commands::ListDatasets => {
            let mut out = io::stdout().lock();
            for (city, path) in registry.iter() {
                let status = if path.exists() { "found" } else { "missing" };
                writeln!(out, "{:<12}{}  ({status})", city.name(), path.display())?;
            }
        }
    }

    Ok(())
}

/// Directives from `env_var` when set, otherwise everything at `fallback` and above.
fn log_filter(env_var: &str, fallback: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(fallback.into())
        .with_env_var(env_var)
        .from_env_lossy()
}

/// Data directory from the flag, then `BIKESHARE_DATA_DIR`, then the working directory.
fn build_registry(args: &DataArgs) -> Result<DatasetRegistry> {
    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    info!(data_dir = %data_dir.display(), "Using data directory");

    let registry = DatasetRegistry::new(data_dir);
    match &args.registry {
        Some(path) => registry.with_overrides_from(path),
        None => Ok(registry),
    }
}
