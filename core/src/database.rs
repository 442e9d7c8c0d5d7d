//! The installed nmap prefix table.
//!
//! Lines are kept exactly as read, line endings included, so that rendering
//! an unmodified database reproduces the file byte for byte. Only appended
//! records are formatted.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use ouiup_common::config::MalformedPolicy;
use ouiup_common::error::{SkippedLine, UpdateError};
use ouiup_common::record::{Prefix, PrefixRecord};
use tracing::{debug, warn};

const BOM: char = '\u{FEFF}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `raw` is the line as read, including its line ending.
    Entry { record: PrefixRecord, raw: String },
    /// Comments, blank lines and anything that isn't an entry.
    Verbatim(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixDatabase {
    lines: Vec<Line>,
    /// Ending used for appended records, taken from the file's first line.
    newline: &'static str,
}

impl Default for PrefixDatabase {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            newline: "\n",
        }
    }
}

impl PrefixDatabase {
    /// Reads the database at `path`. A missing file is reported separately
    /// from other read failures.
    pub fn load(
        path: &Path,
        policy: MalformedPolicy,
    ) -> Result<(Self, Vec<SkippedLine>), UpdateError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => UpdateError::NotFound(path.to_path_buf()),
            _ => UpdateError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::parse(&text, policy, &path.display().to_string())
    }

    pub fn parse(
        text: &str,
        policy: MalformedPolicy,
        origin: &str,
    ) -> Result<(Self, Vec<SkippedLine>), UpdateError> {
        let mut lines = Vec::new();
        let mut skipped = Vec::new();

        for (idx, raw) in text.split_inclusive('\n').enumerate() {
            let content = if idx == 0 {
                raw.trim_start_matches(BOM).trim()
            } else {
                raw.trim()
            };
            if content.is_empty() || content.starts_with('#') {
                lines.push(Line::Verbatim(raw.to_string()));
                continue;
            }
            match parse_entry(content) {
                Ok(record) => lines.push(Line::Entry {
                    record,
                    raw: raw.to_string(),
                }),
                Err(reason) => {
                    let line = SkippedLine {
                        line: idx + 1,
                        reason,
                    };
                    if policy == MalformedPolicy::Abort {
                        return Err(line.into_error(origin));
                    }
                    warn!("Keeping unparsed line {} of {}: {}", line.line, origin, line.reason);
                    lines.push(Line::Verbatim(raw.to_string()));
                    skipped.push(line);
                }
            }
        }

        let newline = match text.split_inclusive('\n').next() {
            Some(first) if first.ends_with("\r\n") => "\r\n",
            _ => "\n",
        };
        let db = Self { lines, newline };
        debug!("Read {} entries from {}", db.len(), origin);
        Ok((db, skipped))
    }

    pub fn records(&self) -> impl Iterator<Item = &PrefixRecord> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry { record, .. } => Some(record),
            Line::Verbatim(_) => None,
        })
    }

    pub fn prefixes(&self) -> HashSet<&Prefix> {
        self.records().map(|r| &r.prefix).collect()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of entries, not counting comments.
    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, record: PrefixRecord) {
        let raw = format!("{record}{}", self.newline);
        self.lines.push(Line::Entry { record, raw });
    }

    /// Serializes the database in the nmap text format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let (Line::Entry { raw, .. } | Line::Verbatim(raw)) = line;
            if !out.is_empty() && !out.ends_with('\n') {
                out.push_str(self.newline);
            }
            out.push_str(raw);
        }
        out
    }
}

/// `PREFIX Vendor name`, separated by any whitespace.
fn parse_entry(content: &str) -> Result<PrefixRecord, String> {
    let (prefix, vendor) = content
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("'{content}' has no vendor"))?;
    let vendor = vendor.trim();
    if vendor.is_empty() {
        return Err(format!("'{content}' has no vendor"));
    }
    PrefixRecord::parse(prefix, vendor).map_err(|e| format!("{e}"))
}
