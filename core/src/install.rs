//! Backup and replacement of the installed database.
//!
//! The installed file is only ever replaced by a rename, and only after the
//! new content has been written and read back from the staging file.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ouiup_common::config::Config;
use ouiup_common::error::UpdateError;
use tracing::{debug, info, warn};

const FALLBACK_NAME: &str = "nmap-mac-prefixes";

pub struct Installer {
    db_path: PathBuf,
    backup_dir: PathBuf,
    work_dir: PathBuf,
}

/// A fully written and verified copy of the merged database.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Installer {
    pub fn new(
        db_path: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            db_path: db_path.into(),
            backup_dir: backup_dir.into(),
            work_dir: work_dir.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.db_path, &cfg.backup_dir, &cfg.work_dir)
    }

    fn file_name(&self) -> &OsStr {
        self.db_path
            .file_name()
            .unwrap_or(OsStr::new(FALLBACK_NAME))
    }

    /// `<work_dir>/<name>_updated`
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self.file_name().to_os_string();
        name.push("_updated");
        self.work_dir.join(name)
    }

    /// Hidden file next to the installed database, renamed over it on commit.
    fn swap_path(&self) -> PathBuf {
        let mut name = OsStr::new(".").to_os_string();
        name.push(self.file_name());
        name.push(".ouiup-tmp");
        match self.db_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
            _ => PathBuf::from(name),
        }
    }

    /// Copies the installed database to `<backup_dir>/<name>.<YYYYmmdd.HHMMSS>`.
    pub fn backup(&self, now: DateTime<Local>) -> Result<PathBuf, UpdateError> {
        let fail = |backup: &Path, source: io::Error| UpdateError::Backup {
            path: self.db_path.clone(),
            backup: backup.to_path_buf(),
            source,
        };

        if !self.backup_dir.is_dir() {
            info!("Creating backup directory {}", self.backup_dir.display());
            fs::create_dir_all(&self.backup_dir).map_err(|e| fail(&self.backup_dir, e))?;
        }

        let dst = self.free_backup_path(&now.format("%Y%m%d.%H%M%S").to_string());
        let copied = fs::copy(&self.db_path, &dst).map_err(|e| fail(&dst, e))?;
        let expected = fs::metadata(&self.db_path)
            .map_err(|e| fail(&dst, e))?
            .len();
        if copied != expected {
            return Err(fail(
                &dst,
                io::Error::other(format!("copied {copied} of {expected} bytes")),
            ));
        }

        debug!("Backed up {} bytes to {}", copied, dst.display());
        Ok(dst)
    }

    fn free_backup_path(&self, stamp: &str) -> PathBuf {
        let base = format!("{}.{}", self.file_name().to_string_lossy(), stamp);
        let mut candidate = self.backup_dir.join(&base);
        let mut n = 1;
        while candidate.exists() {
            candidate = self.backup_dir.join(format!("{base}.{n}"));
            n += 1;
        }
        candidate
    }

    /// Writes `contents` to the staging path and checks it reads back identically.
    pub fn stage(&self, contents: &str) -> Result<StagedFile, UpdateError> {
        let path = self.staging_path();
        let fail = |source: io::Error| UpdateError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.work_dir).map_err(fail)?;
        let mut file = File::create(&path).map_err(fail)?;
        file.write_all(contents.as_bytes()).map_err(fail)?;
        file.sync_all().map_err(fail)?;
        drop(file);

        let written = fs::read(&path).map_err(fail)?;
        if written != contents.as_bytes() {
            return Err(fail(io::Error::other(
                "staged file does not match the merged database",
            )));
        }

        debug!("Staged {} bytes at {}", written.len(), path.display());
        Ok(StagedFile { path })
    }

    /// Atomically replaces the installed database with the staged file.
    pub fn commit(&self, staged: &StagedFile) -> Result<(), UpdateError> {
        let swap = self.swap_path();
        let result = self.swap_in(staged, &swap);
        if result.is_err() && swap.exists() {
            if let Err(e) = fs::remove_file(&swap) {
                warn!("Could not remove leftover {}: {}", swap.display(), e);
            }
        }
        result.map_err(|source| UpdateError::Write {
            path: self.db_path.clone(),
            source,
        })
    }

    fn swap_in(&self, staged: &StagedFile, swap: &Path) -> io::Result<()> {
        fs::copy(&staged.path, swap)?;
        if let Ok(meta) = fs::metadata(&self.db_path) {
            fs::set_permissions(swap, meta.permissions())?;
        }
        File::open(swap)?.sync_all()?;
        fs::rename(swap, &self.db_path)
    }
}
