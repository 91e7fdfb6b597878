use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

use snapvet_core::{evaluate, load_snapshot, render_json, render_markdown, SnapshotDoc};
use snapvet_types::AGENT;

#[derive(Parser)]
#[command(name = "snapvet")]
#[command(about = "Coherence vetting for merged repository snapshots", long_about = None)]
struct Cli {
    /// Path to the merged snapshot JSON.
    snapshot: PathBuf,

    /// Output directory for report artifacts.
    #[arg(long, default_value = "reports/snapvet")]
    out: PathBuf,

    /// Also write a machine-readable JSON mirror of the report.
    #[arg(long)]
    json: bool,

    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    let value = load_snapshot(&cli.snapshot)?;
    let doc = SnapshotDoc::new(value)?;
    info!("Snapshot loaded: {}", cli.snapshot.display());

    let report = evaluate(&doc, &cli.snapshot.display().to_string(), Utc::now());
    debug!(
        "Evaluation produced {} finding(s), uncertainty {:.2}",
        report.findings.len(),
        report.uncertainty.score
    );

    let stem = cli
        .snapshot
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("snapshot");

    let md_path = cli.out.join(format!("{stem}__{AGENT}.md"));
    write_text(&md_path, &render_markdown(&report))?;

    if cli.json {
        let json_path = cli.out.join(format!("{stem}__{AGENT}.json"));
        let json = render_json(&report).context("serialize report")?;
        write_text(&json_path, &json)?;
    }

    println!("Wrote: {}", md_path.display());
    Ok(0)
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }

    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
