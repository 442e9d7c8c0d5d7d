use colored::*;
use is_root::is_root;
use ouiup_common::config::Config;
use ouiup_core::fetch::{FileRegistry, HttpRegistry, RegistrySource};
use ouiup_core::updater::{self, Outcome, UpdateReport};
use tracing::warn;

use crate::terminal::{colors, print, spinner};

/// How many of the new prefixes are listed before the rest is summarized.
const LISTED_RECORDS: usize = 10;

pub async fn update(cfg: &Config, skip_root_check: bool) -> anyhow::Result<()> {
    check_privileges(cfg, skip_root_check)?;

    let source: Box<dyn RegistrySource> = match &cfg.registry_file {
        Some(path) => Box::new(FileRegistry::new(path)),
        None => Box::new(HttpRegistry::new(&cfg.source_url, cfg.timeout)?),
    };

    print::header("updating prefix table", cfg.quiet);
    spinner::start("Working...");
    let result = updater::run(cfg, source.as_ref()).await;
    spinner::finish();

    let report = result?;
    print_report(&report, cfg);
    Ok(())
}

/// Writing under /usr/share needs root; anything else is left to the filesystem.
fn check_privileges(cfg: &Config, skip: bool) -> anyhow::Result<()> {
    if skip || cfg.dry_run || !cfg.targets_system_db() || is_root() {
        return Ok(());
    }
    anyhow::bail!(
        "updating {} requires root (use --no-root-check to try anyway)",
        cfg.db_path.display()
    )
}

fn print_report(report: &UpdateReport, cfg: &Config) {
    let skipped = report.skipped_registry.len() + report.skipped_database.len();
    if skipped > 0 {
        warn!("Skipped {} malformed line(s)", skipped);
    }

    if cfg.quiet > 0 {
        return;
    }

    print::header("summary", cfg.quiet);
    print::aligned_line("Registry", format!("{} records", report.fetched));
    print::aligned_line("Database", format!("{} entries", report.existing));
    print::aligned_line(
        "New",
        format!("{} prefixes", report.added.len()).green().bold(),
    );
    if skipped > 0 {
        print::aligned_line("Skipped", format!("{skipped} lines").yellow());
    }
    if let Some(backup) = &report.backup {
        print::aligned_line("Backup", backup.display().to_string());
    }
    if let Some(staged) = &report.staged {
        print::aligned_line("Staged", staged.display().to_string());
    }

    print_added(report);

    let verdict: ColoredString = match report.outcome {
        Outcome::Installed => format!("Installed {}", cfg.db_path.display()).bold().green(),
        Outcome::UpToDate => "Already up to date".bold().green(),
        Outcome::DryRun => "Dry run, nothing was written".bold().yellow(),
    };
    print::fat_separator();
    print::centerln(&verdict.to_string());
}

fn print_added(report: &UpdateReport) {
    if report.added.is_empty() {
        return;
    }

    let mut lines: Vec<(String, ColoredString)> = report
        .added
        .iter()
        .take(LISTED_RECORDS)
        .map(|r| (r.prefix.to_string(), r.vendor.color(colors::TEXT_DEFAULT)))
        .collect();
    let rest = report.added.len().saturating_sub(LISTED_RECORDS);
    if rest > 0 {
        lines.push((
            "...".to_string(),
            format!("and {rest} more").color(colors::ACCENT),
        ));
    }

    print::header("new prefixes", 0);
    print::as_tree_one_level(&lines);
}
