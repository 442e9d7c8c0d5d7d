//! Runs the whole update: fetch, parse, read, merge, backup, stage, commit.
//!
//! Every stage completes before the next begins and any error ends the run.
//! Nothing under the installed path is written before the backup exists.

use std::path::PathBuf;

use chrono::Local;
use ouiup_common::config::Config;
use ouiup_common::error::{SkippedLine, UpdateError};
use ouiup_common::record::PrefixRecord;
use ouiup_common::success;
use tracing::{debug, info};

use crate::database::PrefixDatabase;
use crate::fetch::RegistrySource;
use crate::install::Installer;
use crate::merge;
use crate::registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The merged database replaced the installed one.
    Installed,
    /// The registry had nothing the database was missing.
    UpToDate,
    /// Dry run: nothing was written.
    DryRun,
}

#[derive(Debug)]
pub struct UpdateReport {
    pub outcome: Outcome,
    /// Records read from the registry, repeats included.
    pub fetched: usize,
    /// Entries in the installed database before the run.
    pub existing: usize,
    pub added: Vec<PrefixRecord>,
    pub skipped_registry: Vec<SkippedLine>,
    pub skipped_database: Vec<SkippedLine>,
    pub backup: Option<PathBuf>,
    pub staged: Option<PathBuf>,
}

pub async fn run(cfg: &Config, source: &dyn RegistrySource) -> Result<UpdateReport, UpdateError> {
    info!("Downloading latest OUI data from {}", source.describe());
    let text = source.fetch().await?;
    success!("Downloaded {} bytes", text.len());

    if let Some(path) = &cfg.save_registry {
        std::fs::write(path, &text).map_err(|e| UpdateError::Write {
            path: path.clone(),
            source: e,
        })?;
        debug!("Saved registry copy to {}", path.display());
    }

    let parsed = registry::parse(&text, cfg.malformed)?;
    drop(text);

    let (existing, skipped_database) = PrefixDatabase::load(&cfg.db_path, cfg.malformed)?;
    info!(
        "Comparing {} registry records against {} known prefixes",
        parsed.records.len(),
        existing.len()
    );

    let merged = merge::merge(&existing, &parsed.records);
    let mut report = UpdateReport {
        outcome: Outcome::UpToDate,
        fetched: parsed.records.len(),
        existing: existing.len(),
        added: merged.added,
        skipped_registry: parsed.skipped,
        skipped_database,
        backup: None,
        staged: None,
    };

    if report.added.is_empty() {
        info!("No new records");
        return Ok(report);
    }
    success!("Found {} new OUIs", report.added.len());

    if cfg.dry_run {
        report.outcome = Outcome::DryRun;
        return Ok(report);
    }

    let installer = Installer::from_config(cfg);

    let backup = installer.backup(Local::now())?;
    info!("Created backup {}", backup.display());
    report.backup = Some(backup);

    let staged = installer.stage(&merged.database.render())?;
    info!("Wrote new data to {}", staged.path().display());
    report.staged = Some(staged.path().to_path_buf());

    installer.commit(&staged)?;
    success!("Installed {}", cfg.db_path.display());
    report.outcome = Outcome::Installed;

    Ok(report)
}
