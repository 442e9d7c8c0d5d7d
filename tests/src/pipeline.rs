#![cfg(test)]
use std::fs;

use ouiup_common::config::MalformedPolicy;
use ouiup_common::error::UpdateError;
use ouiup_core::fetch::FileRegistry;
use ouiup_core::updater::{self, Outcome};

use crate::utils::{Sandbox, StaticRegistry, UnreachableRegistry, registry_text};

const INSTALLED: &str = "# $Id$ generated with make-mac-prefixes.pl\n\
                         001122 Acme\n\
                         AABBCC Foo\n";

fn scenario_registry() -> StaticRegistry {
    StaticRegistry(registry_text(&[("001122", "AcmeCorp"), ("DDEEFF", "Bar")]))
}

#[tokio::test]
async fn appends_missing_prefix_and_installs() {
    let sandbox = Sandbox::new(INSTALLED);

    let report = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap();

    assert_eq!(report.outcome, Outcome::Installed);
    assert_eq!(report.fetched, 2);
    assert_eq!(report.existing, 2);
    assert_eq!(report.added.len(), 1);
    assert_eq!(
        sandbox.installed(),
        format!("{INSTALLED}DDEEFF Bar\n"),
        "existing vendor must win and the new prefix must be appended"
    );
}

#[tokio::test]
async fn backup_matches_previous_install() {
    let sandbox = Sandbox::new(INSTALLED);

    let report = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap();

    let backup = report.backup.expect("a backup is taken before installing");
    assert_eq!(sandbox.backups(), vec![backup.clone()]);
    assert_eq!(fs::read_to_string(backup).unwrap(), INSTALLED);
}

#[tokio::test]
async fn staged_copy_is_left_in_work_dir() {
    let sandbox = Sandbox::new(INSTALLED);

    let report = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap();

    let staged = report.staged.unwrap();
    assert_eq!(staged, sandbox.cfg.work_dir.join("nmap-mac-prefixes_updated"));
    assert_eq!(fs::read_to_string(staged).unwrap(), sandbox.installed());
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let sandbox = Sandbox::new(INSTALLED);
    updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap();
    let after_first = sandbox.installed();

    let report = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap();

    assert_eq!(report.outcome, Outcome::UpToDate);
    assert!(report.added.is_empty());
    assert!(report.backup.is_none());
    assert_eq!(sandbox.installed(), after_first);
    assert_eq!(sandbox.backups().len(), 1);
}

#[tokio::test]
async fn network_failure_touches_nothing() {
    let sandbox = Sandbox::new(INSTALLED);

    let err = updater::run(&sandbox.cfg, &UnreachableRegistry).await.unwrap_err();

    assert!(matches!(err, UpdateError::Network { .. }));
    assert_eq!(sandbox.installed(), INSTALLED);
    assert!(sandbox.backups().is_empty());
    assert!(!sandbox.cfg.work_dir.exists());
}

#[tokio::test]
async fn missing_database_aborts() {
    let sandbox = Sandbox::new(INSTALLED);
    fs::remove_file(&sandbox.cfg.db_path).unwrap();

    let err = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap_err();

    assert!(matches!(err, UpdateError::NotFound(_)));
    assert_eq!(err.exit_code(), 4);
    assert!(sandbox.backups().is_empty());
}

#[tokio::test]
async fn failed_install_keeps_previous_file() {
    let sandbox = Sandbox::new(INSTALLED);
    fs::create_dir(sandbox.swap_path()).unwrap();

    let err = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap_err();

    assert!(matches!(err, UpdateError::Write { .. }));
    assert_eq!(sandbox.installed(), INSTALLED);
    let backups = sandbox.backups();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), INSTALLED);
}

#[tokio::test]
async fn failed_staging_keeps_previous_file() {
    let mut sandbox = Sandbox::new(INSTALLED);
    let blocker = sandbox.dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    sandbox.cfg.work_dir = blocker;

    let err = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap_err();

    assert!(matches!(err, UpdateError::Write { .. }));
    assert_eq!(sandbox.installed(), INSTALLED);
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let mut sandbox = Sandbox::new(INSTALLED);
    sandbox.cfg.dry_run = true;

    let report = updater::run(&sandbox.cfg, &scenario_registry()).await.unwrap();

    assert_eq!(report.outcome, Outcome::DryRun);
    assert_eq!(report.added.len(), 1);
    assert_eq!(sandbox.installed(), INSTALLED);
    assert!(sandbox.backups().is_empty());
    assert!(!sandbox.cfg.work_dir.exists());
}

#[tokio::test]
async fn malformed_registry_lines_are_skipped_by_default() {
    let sandbox = Sandbox::new(INSTALLED);
    let mut text = registry_text(&[("DDEEFF", "Bar")]);
    text.push_str("XYZ123     (base 16)\t\tBroken Corp\n");

    let report = updater::run(&sandbox.cfg, &StaticRegistry(text)).await.unwrap();

    assert_eq!(report.outcome, Outcome::Installed);
    assert_eq!(report.skipped_registry.len(), 1);
}

#[tokio::test]
async fn strict_mode_aborts_before_writing() {
    let mut sandbox = Sandbox::new(INSTALLED);
    sandbox.cfg.malformed = MalformedPolicy::Abort;
    let mut text = registry_text(&[("DDEEFF", "Bar")]);
    text.push_str("XYZ123     (base 16)\t\tBroken Corp\n");

    let err = updater::run(&sandbox.cfg, &StaticRegistry(text)).await.unwrap_err();

    assert!(matches!(err, UpdateError::Parse { .. }));
    assert_eq!(sandbox.installed(), INSTALLED);
    assert!(sandbox.backups().is_empty());
}

#[tokio::test]
async fn local_registry_copy_can_be_used_and_saved() {
    let mut sandbox = Sandbox::new(INSTALLED);
    let local = sandbox.dir.path().join("oui.txt");
    fs::write(&local, registry_text(&[("DDEEFF", "Bar"), ("A0B1C2", "Baz")])).unwrap();
    let saved = sandbox.dir.path().join("ieee_oui_data.txt");
    sandbox.cfg.save_registry = Some(saved.clone());

    let report = updater::run(&sandbox.cfg, &FileRegistry::new(&local)).await.unwrap();

    assert_eq!(report.added.len(), 2);
    assert_eq!(fs::read(saved).unwrap(), fs::read(local).unwrap());
    assert!(sandbox.installed().ends_with("DDEEFF Bar\nA0B1C2 Baz\n"));
}
