use std::path::PathBuf;
use std::time::Duration;

/// The IEEE MA-L registry in its plain text form.
pub const DEFAULT_SOURCE_URL: &str = "https://standards-oui.ieee.org/oui/oui.txt";

/// Where nmap keeps its MAC prefix table on most distributions.
pub const DEFAULT_DB_PATH: &str = "/usr/share/nmap/nmap-mac-prefixes";

pub const DEFAULT_BACKUP_DIR: &str = "backups";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// What to do with a line that looks like a record but can't be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Skip the line, remember it and keep going.
    #[default]
    Skip,
    /// Treat the first malformed line as fatal.
    Abort,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Registry endpoint. Ignored when `registry_file` is set.
    pub source_url: String,
    /// Read the registry from a local copy instead of downloading it.
    pub registry_file: Option<PathBuf>,
    /// Keep a copy of the downloaded registry text at this path.
    pub save_registry: Option<PathBuf>,
    /// The installed prefix database that gets updated.
    pub db_path: PathBuf,
    pub backup_dir: PathBuf,
    /// Directory receiving the `<name>_updated` staging file.
    pub work_dir: PathBuf,
    pub timeout: Duration,
    pub malformed: MalformedPolicy,
    /// Stop after the merge and only report what would be added.
    pub dry_run: bool,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            registry_file: None,
            save_registry: None,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            work_dir: PathBuf::from("."),
            timeout: DEFAULT_TIMEOUT,
            malformed: MalformedPolicy::default(),
            dry_run: false,
            quiet: 0,
            no_banner: false,
        }
    }
}

impl Config {
    /// True when the run targets the system-wide nmap table.
    pub fn targets_system_db(&self) -> bool {
        self.db_path == PathBuf::from(DEFAULT_DB_PATH)
    }
}
