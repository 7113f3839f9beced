//! Runtime configuration for the command-line front end.
//!
//! # Responsibility
//! - Resolve database path and logging settings.
//!
//! # Invariants
//! - Precedence is flag, then environment variable, then default.
//! - Blank values are treated as unset.

use checklist_core::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CHECKLIST_DB_PATH";
pub const LOG_DIR_ENV: &str = "CHECKLIST_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "CHECKLIST_LOG_LEVEL";
const DEFAULT_DB_FILE_NAME: &str = "checklist.sqlite3";

/// Raw values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    /// Logging stays off when no directory is configured.
    pub log_dir: Option<String>,
    pub log_level: String,
}

impl CliConfig {
    /// Resolves settings against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves settings against an arbitrary variable lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let env = |key: &str| lookup(key).and_then(non_blank);

        let db_path = overrides
            .db_path
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| env(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = overrides
            .log_dir
            .and_then(non_blank)
            .or_else(|| env(LOG_DIR_ENV));
        let log_level = overrides
            .log_level
            .and_then(non_blank)
            .or_else(|| env(LOG_LEVEL_ENV))
            .unwrap_or_else(|| default_log_level().to_string());

        Self {
            db_path,
            log_dir,
            log_level,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
