//! Parser for the IEEE MA-L text export (`oui.txt`).
//!
//! Each assignment spans several lines; only the `(base 16)` line matters:
//!
//! ```text
//! 28-6F-B9   (hex)		Juniper Networks
//! 286FB9     (base 16)		Juniper Networks
//! 				1133 Innovation Way
//! ```

use std::sync::OnceLock;

use ouiup_common::config::MalformedPolicy;
use ouiup_common::error::{SkippedLine, UpdateError};
use ouiup_common::record::{Prefix, PrefixRecord};
use regex::Regex;
use tracing::{debug, warn};

use crate::fetch::REGISTRY_MARKER;

pub const ORIGIN: &str = "IEEE registry";

fn record_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([0-9A-Fa-f]{6})\s+\(base 16\)\s*(.*)$").expect("static regex is valid")
    })
}

#[derive(Debug, Default)]
pub struct ParsedRegistry {
    /// Records in document order. May contain repeated prefixes.
    pub records: Vec<PrefixRecord>,
    pub skipped: Vec<SkippedLine>,
}

pub fn parse(text: &str, policy: MalformedPolicy) -> Result<ParsedRegistry, UpdateError> {
    let mut parsed = ParsedRegistry::default();

    for (idx, line) in text.lines().enumerate() {
        if !line.contains(REGISTRY_MARKER) {
            continue;
        }
        match parse_line(line) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                let skipped = SkippedLine {
                    line: idx + 1,
                    reason,
                };
                if policy == MalformedPolicy::Abort {
                    return Err(skipped.into_error(ORIGIN));
                }
                warn!("Skipping registry line {}: {}", skipped.line, skipped.reason);
                parsed.skipped.push(skipped);
            }
        }
    }

    if parsed.records.is_empty() {
        return Err(UpdateError::Parse {
            origin: ORIGIN.to_string(),
            line: 0,
            reason: "no assignments found".to_string(),
        });
    }

    debug!(
        "Parsed {} registry records, skipped {}",
        parsed.records.len(),
        parsed.skipped.len()
    );
    Ok(parsed)
}

fn parse_line(line: &str) -> Result<PrefixRecord, String> {
    let caps = record_line()
        .captures(line.trim_end())
        .ok_or_else(|| format!("unrecognized record line '{}'", line.trim()))?;

    let vendor = caps[2].trim();
    if vendor.is_empty() {
        return Err(format!("assignment {} has no organization", &caps[1]));
    }
    let prefix: Prefix = caps[1].parse().map_err(|e| format!("{e}"))?;
    Ok(PrefixRecord::new(prefix, vendor))
}
