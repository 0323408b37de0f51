use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use slotref::{Config, UseRecord};

/// Resolve Qt SIGNAL/SLOT strings in exported translation units.
#[derive(Debug, Parser)]
#[command(name = "slotref", version, about)]
struct Cli {
    /// Unit files, or directories searched for `*.json` unit files.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Configuration file (defaults to the user config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Debug, Serialize)]
struct UnitReport {
    unit: PathBuf,
    uses: Vec<UseRecord>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let units = collect_unit_files(&cli.paths);
    if units.is_empty() {
        tracing::warn!("no unit files found");
    }

    let results = slotref::resolve_files(&units, &config.resolver);

    let mut failed = false;
    let mut out = std::io::stdout().lock();
    for (path, result) in units.into_iter().zip(results) {
        let uses = match result {
            Ok(uses) => uses,
            Err(err) => {
                tracing::warn!("skipping unit: {err}");
                failed = true;
                continue;
            }
        };
        let report = UnitReport { unit: path, uses };
        if let Err(err) = write_report(&mut out, &report, cli.format) {
            tracing::error!("failed to write output: {err}");
            return ExitCode::FAILURE;
        }
    }

    if failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

/// Expand directories into the `*.json` files below them, honouring
/// ignore files.  Explicit file arguments are kept as given.
fn collect_unit_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = ignore::WalkBuilder::new(path)
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

fn write_report(out: &mut impl Write, report: &UnitReport, format: Format) -> std::io::Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)
        }
        Format::Text => {
            for used in &report.uses {
                writeln!(
                    out,
                    "{}:{}-{}: {}{}",
                    report.unit.display(),
                    used.range.begin,
                    used.range.end,
                    used.declaration,
                    used.context
                        .as_deref()
                        .map(|c| format!(" (in {c})"))
                        .unwrap_or_default()
                )?;
            }
            Ok(())
        }
    }
}
