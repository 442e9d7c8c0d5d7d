use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separators accepted between hex digits when reading a prefix.
const SEPARATORS: [char; 3] = ['-', ':', '.'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    #[error("'{0}' is not a hex digit")]
    InvalidDigit(char),
    #[error("prefix has {0} hex digits, expected 6, 7 or 9")]
    InvalidLength(usize),
}

/// A MAC address block assigned by the IEEE, normalized to upper-case hex
/// without separators.
///
/// 6 digits is a full OUI (MA-L). The 7 and 9 digit forms are the MA-M and
/// MA-S blocks nmap lists alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(String);

impl Prefix {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of address bits the prefix covers.
    pub fn bits(&self) -> usize {
        self.0.len() * 4
    }
}

impl FromStr for Prefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut normalized = String::with_capacity(s.len());
        for c in s.trim().chars().filter(|c| !SEPARATORS.contains(c)) {
            if !c.is_ascii_hexdigit() {
                return Err(PrefixError::InvalidDigit(c));
            }
            normalized.push(c.to_ascii_uppercase());
        }

        match normalized.len() {
            6 | 7 | 9 => Ok(Self(normalized)),
            len => Err(PrefixError::InvalidLength(len)),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRecord {
    pub prefix: Prefix,
    pub vendor: String,
}

impl PrefixRecord {
    pub fn new(prefix: Prefix, vendor: impl Into<String>) -> Self {
        Self {
            prefix,
            vendor: vendor.into(),
        }
    }

    /// Builds a record from raw text, normalizing the prefix and trimming the vendor.
    pub fn parse(prefix: &str, vendor: &str) -> Result<Self, PrefixError> {
        Ok(Self::new(prefix.parse()?, vendor.trim()))
    }
}

/// Renders the record the way nmap lists it: `PREFIX Vendor`.
impl fmt::Display for PrefixRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prefix, self.vendor)
    }
}
