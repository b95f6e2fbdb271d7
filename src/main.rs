//! CLI entry point for the bikeshare statistics explorer.
//!
//! Provides an interactive session that mirrors the classic prompt-driven
//! report, a one-shot `report` subcommand, and a listing of known datasets.

mod shell;

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_stats::analyzers::build_report;
use bikeshare_stats::output::{render_json, render_page};
use bikeshare_stats::{City, DatasetRegistry, FilterSpec, load, next_page};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    /// (defaults to $BIKESHARE_DATA_DIR, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a city and filters, then browse the statistics
    Explore,
    /// Print statistics for one city and filter selection
    Report {
        /// chicago, "new york" or washington
        #[arg(short, long)]
        city: String,

        /// all, or january through june
        #[arg(short, long, default_value = "all")]
        month: String,

        /// all, or a weekday name
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Emit the report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Number of raw-row pages to print after the report
        #[arg(long, default_value_t = 0)]
        raw_pages: usize,
    },
    /// List known cities and where their data is expected
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_tracing()?;

    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let registry = DatasetRegistry::new(data_dir);

    match cli.command {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Shell::new(stdin.lock(), stdout.lock(), registry).run()?;
        }
        Commands::Report {
            city,
            month,
            day,
            json,
            raw_pages,
        } => {
            let spec = FilterSpec::parse(&city, &month, &day)?;
            report(&registry, &spec, json, raw_pages)?;
        }
        Commands::Cities => {
            let mut out = std::io::stdout().lock();
            for city in City::ALL {
                let path = registry.path_for(city);
                let status = if path.exists() { "found" } else { "missing" };
                writeln!(out, "{:<12}{} ({status})", city.to_string(), path.display())?;
            }
        }
    }

    Ok(())
}

/// Sets up a colored stderr layer and a JSON daily-rolling file layer.
///
/// The returned guard must stay alive for buffered file logs to be flushed.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays quiet by default so interactive prompts are readable
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Loads, filters and prints one report, followed by `raw_pages` pages of rows.
#[tracing::instrument(skip(registry))]
fn report(registry: &DatasetRegistry, spec: &FilterSpec, json: bool, raw_pages: usize) -> Result<()> {
    let path = registry.path_for(spec.city);
    let table = load(&path).with_context(|| format!("loading trip data for {}", spec.city))?;
    let table = spec.apply(&table);
    info!(trips = table.len(), "Filtered table ready");

    let report = build_report(spec, &table);
    let mut out = std::io::stdout().lock();
    if json {
        writeln!(out, "{}", render_json(&report)?)?;
    } else {
        write!(out, "{report}")?;
    }

    let mut offset = 0;
    for _ in 0..raw_pages {
        let (rows, next) = next_page(&table, offset);
        if rows.is_empty() {
            break;
        }
        write!(out, "{}", render_page(rows)?)?;
        offset = next;
    }

    Ok(())
}
