//! `pulse`: load aggregated Pulse exports into SQLite and print findings.
//!
//! # Usage
//!
//! ```text
//! pulse --data-root pulse/data load --reset
//! pulse report
//! pulse report average-transaction-amount --format json
//! ```

mod config;
mod render;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pulse_core::{finding::Finding, store::FactStore};
use pulse_store_sqlite::SqliteStore;
use strum::IntoEnumIterator;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, PulseConfig};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "pulse", version, about = "Pulse export loader and findings")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "pulse.toml")]
  config: PathBuf,

  /// Directory containing the export's `aggregated/` tree.
  #[arg(long, value_name = "DIR")]
  data_root: Option<PathBuf>,

  /// SQLite file holding the fact tables.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the fact tables if they do not exist.
  Init,

  /// Extract the export and append its facts to the store.
  Load {
    /// Empty every fact table before loading.
    #[arg(long)]
    reset: bool,
  },

  /// Print one finding, or all of them in catalog order.
  Report {
    /// Finding slug, e.g. `top-transaction-types`.
    finding: Option<Finding>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
  },

  /// Print the row count of each fact table.
  Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
  Text,
  Json,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = PulseConfig::load(&cli.config, Overrides {
    data_root:  cli.data_root,
    store_path: cli.store,
  })?;

  let mut store = SqliteStore::open(&cfg.store_path)
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.command {
    Command::Init => {
      tracing::info!(path = %cfg.store_path.display(), "schema ready");
    }
    Command::Load { reset } => load(&mut store, &cfg, reset)?,
    Command::Report { finding, format } => report(&store, finding, format)?,
    Command::Status => {
      let counts = store.table_counts().context("failed to count rows")?;
      println!("aggregated_transaction     {}", counts.transactions);
      println!("aggregated_user_summary    {}", counts.user_summaries);
      println!("aggregated_user_by_device  {}", counts.device_usage);
    }
  }

  Ok(())
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

fn load(store: &mut SqliteStore, cfg: &PulseConfig, reset: bool) -> anyhow::Result<()> {
  if reset {
    store.reset().context("failed to reset fact tables")?;
  }

  let layout = cfg.layout();
  tracing::info!(
    root = %layout.root.display(),
    region = %layout.region.label,
    "loading export"
  );

  let loaded = pulse_ingest::load_all(store, &layout)
    .with_context(|| format!("failed to load export from {}", layout.root.display()))?;
  tracing::info!(
    transaction_partitions = loaded.transaction_partitions,
    user_partitions = loaded.user_partitions,
    transactions = loaded.transactions,
    user_summaries = loaded.user_summaries,
    device_usage = loaded.device_usage,
    rows = loaded.total(),
    "load complete"
  );
  Ok(())
}

/// Run the selected findings. A failing finding is logged and skipped so the
/// rest still print; the command fails at the end if any did.
fn report(
  store: &SqliteStore,
  only: Option<Finding>,
  format: Format,
) -> anyhow::Result<()> {
  let selected: Vec<Finding> = match only {
    Some(f) => vec![f],
    None => Finding::iter().collect(),
  };

  let mut reports = Vec::with_capacity(selected.len());
  let mut failed = 0usize;
  for finding in selected {
    match store.run_finding(finding) {
      Ok(r) => reports.push(r),
      Err(e) => {
        tracing::error!(%finding, error = %e, "finding failed");
        failed += 1;
      }
    }
  }

  match format {
    Format::Text => {
      let blocks: Vec<_> = reports.iter().map(render::text).collect();
      print!("{}", blocks.join("\n"));
    }
    Format::Json => {
      println!("{}", serde_json::to_string_pretty(&reports)?);
    }
  }

  if failed > 0 {
    anyhow::bail!("{failed} finding(s) failed");
  }
  Ok(())
}
