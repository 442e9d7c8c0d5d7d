use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an update run. All of them are fatal.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("failed to fetch registry from {source_name}: {reason}")]
    Network { source_name: String, reason: String },

    #[error("{origin}, line {line}: {reason}")]
    Parse {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("prefix database not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to back up {} to {}: {source}", path.display(), backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl UpdateError {
    pub fn network(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Network {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Network { .. } => 2,
            Self::Parse { .. } => 3,
            Self::NotFound(_) | Self::Io { .. } => 4,
            Self::Backup { .. } => 5,
            Self::Write { .. } => 6,
        }
    }
}

/// A line that was passed over under [`MalformedPolicy::Skip`](crate::config::MalformedPolicy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

impl SkippedLine {
    pub fn into_error(self, origin: &str) -> UpdateError {
        UpdateError::Parse {
            origin: origin.to_string(),
            line: self.line,
            reason: self.reason,
        }
    }
}
