#![cfg(test)]
use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use ouiup_common::config::Config;
use ouiup_common::error::UpdateError;
use ouiup_core::fetch::RegistrySource;
use tempfile::TempDir;

/// Registry text in the IEEE export layout.
pub fn registry_text(records: &[(&str, &str)]) -> String {
    let mut text = String::from("OUI/MA-L\t\t\tOrganization\ncompany_id\t\t\tOrganization\n\n");
    for (prefix, org) in records {
        let hex = format!("{}-{}-{}", &prefix[0..2], &prefix[2..4], &prefix[4..6]);
        text.push_str(&format!("{hex}   (hex)\t\t{org}\n"));
        text.push_str(&format!("{prefix}     (base 16)\t\t{org}\n"));
        text.push_str("\t\t\t\tSomewhere 1\n\t\t\t\tUS\n\n");
    }
    text
}

/// Serves a fixed document instead of going to the network.
pub struct StaticRegistry(pub String);

#[async_trait]
impl RegistrySource for StaticRegistry {
    fn describe(&self) -> String {
        "static registry".to_string()
    }

    async fn fetch(&self) -> Result<String, UpdateError> {
        Ok(self.0.clone())
    }
}

pub struct UnreachableRegistry;

#[async_trait]
impl RegistrySource for UnreachableRegistry {
    fn describe(&self) -> String {
        "unreachable registry".to_string()
    }

    async fn fetch(&self) -> Result<String, UpdateError> {
        Err(UpdateError::network(self.describe(), "connection refused"))
    }
}

/// A temporary tree with an installed database, a backup dir and a work dir.
pub struct Sandbox {
    pub dir: TempDir,
    pub cfg: Config,
}

impl Sandbox {
    pub fn new(installed: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let share = dir.path().join("share");
        fs::create_dir_all(&share).expect("create share dir");
        let db_path = share.join("nmap-mac-prefixes");
        fs::write(&db_path, installed).expect("write installed db");

        let cfg = Config {
            db_path,
            backup_dir: dir.path().join("backups"),
            work_dir: dir.path().join("work"),
            ..Config::default()
        };
        Self { dir, cfg }
    }

    pub fn installed(&self) -> String {
        fs::read_to_string(&self.cfg.db_path).expect("read installed db")
    }

    pub fn backups(&self) -> Vec<PathBuf> {
        match fs::read_dir(&self.cfg.backup_dir) {
            Ok(entries) => entries.map(|e| e.expect("dir entry").path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn swap_path(&self) -> PathBuf {
        self.dir.path().join("share/.nmap-mac-prefixes.ouiup-tmp")
    }
}
