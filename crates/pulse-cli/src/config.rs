//! Runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file given
//! with `--config` (optional), `PULSE_*` environment variables, then CLI
//! flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use pulse_core::period::Region;
use pulse_ingest::SourceLayout;
use serde::Deserialize;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Deserialize)]
pub struct PulseConfig {
  /// Directory containing `aggregated/`.
  pub data_root:    PathBuf,
  /// SQLite file holding the fact tables.
  pub store_path:   PathBuf,
  pub region_slug:  String,
  pub region_label: String,
}

/// Flag values that override every other source when present.
#[derive(Debug, Default)]
pub struct Overrides {
  pub data_root:  Option<PathBuf>,
  pub store_path: Option<PathBuf>,
}

impl PulseConfig {
  pub fn load(file: &Path, overrides: Overrides) -> anyhow::Result<Self> {
    let region = Region::default();
    let path_value = |p: Option<PathBuf>| p.map(|p| p.display().to_string());

    let settings = config::Config::builder()
      .set_default("data_root", "pulse/data")?
      .set_default("store_path", "pulse.db")?
      .set_default("region_slug", region.slug)?
      .set_default("region_label", region.label)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("PULSE"))
      .set_override_option("data_root", path_value(overrides.data_root))?
      .set_override_option("store_path", path_value(overrides.store_path))?
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise PulseConfig")
  }

  pub fn region(&self) -> Region {
    Region::new(&self.region_slug, &self.region_label)
  }

  pub fn layout(&self) -> SourceLayout {
    SourceLayout::new(&self.data_root, self.region())
  }
}
