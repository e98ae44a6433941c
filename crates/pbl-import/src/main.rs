//! pbl-import binary.
//!
//! Reads `pbl-import.toml` (or the path given with `--config`), overlays
//! `PBL_*` environment variables, and converts one batch of raw journal-item
//! records into a single XML document.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use pbl_import::ImportConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "PBL journal-item importer")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "pbl-import.toml")]
  config: PathBuf,

  /// Treat the records as retro-converted (1944–1988) input.
  #[arg(long)]
  retro: bool,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PBL"))
    .build()
    .context("failed to read config file")?;

  let mut import_cfg: ImportConfig = settings
    .try_deserialize()
    .context("failed to deserialise ImportConfig")?;
  import_cfg.retro |= cli.retro;

  let summary = pbl_import::run(&import_cfg).with_context(|| {
    format!("import of {:?} failed", import_cfg.records_path)
  })?;

  tracing::info!(
    records = summary.records,
    persons_matched = summary.persons.matched,
    persons_unmatched = summary.persons.unmatched,
    journals_matched = summary.journals.matched,
    journals_unmatched = summary.journals.unmatched,
    output = ?import_cfg.output_path,
    "import finished"
  );

  Ok(())
}
