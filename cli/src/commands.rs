pub mod update;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use ouiup_common::config::{
    Config, DEFAULT_BACKUP_DIR, DEFAULT_DB_PATH, DEFAULT_SOURCE_URL, MalformedPolicy,
};

#[derive(Parser, Debug)]
#[command(name = "ouiup", version)]
#[command(about = "Updates nmap's MAC prefix table from the IEEE OUI registry.")]
pub struct CommandLine {
    /// Registry to download
    #[arg(short, long, value_name = "URL", default_value = DEFAULT_SOURCE_URL)]
    pub url: String,

    /// Prefix database to update
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Where backups of the database are kept
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_BACKUP_DIR)]
    pub backup_dir: PathBuf,

    /// Where the updated copy is staged before it is installed
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Use a downloaded copy of the registry instead of fetching it
    #[arg(long, value_name = "PATH")]
    pub registry_file: Option<PathBuf>,

    /// Keep a copy of the registry text
    #[arg(long, value_name = "PATH")]
    pub save_registry: Option<PathBuf>,

    /// Download timeout in seconds
    #[arg(short, long, value_name = "SECS", default_value_t = 60)]
    pub timeout: u64,

    /// Fail on malformed lines instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Report new prefixes without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Allow updating the system database without root
    #[arg(long)]
    pub no_root_check: bool,

    #[arg(long)]
    pub no_banner: bool,

    /// Less output, repeat for even less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            source_url: self.url.clone(),
            registry_file: self.registry_file.clone(),
            save_registry: self.save_registry.clone(),
            db_path: self.db.clone(),
            backup_dir: self.backup_dir.clone(),
            work_dir: self.work_dir.clone(),
            timeout: Duration::from_secs(self.timeout),
            malformed: if self.strict {
                MalformedPolicy::Abort
            } else {
                MalformedPolicy::Skip
            },
            dry_run: self.dry_run,
            quiet: self.quiet,
            no_banner: self.no_banner,
        }
    }
}
