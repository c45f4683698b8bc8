//! Runtime configuration read from the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use guide_core::model::{PathTree, SubjectCatalog};

use crate::error::ConfigError;

pub const DB_URL_VAR: &str = "GUIDE_DB_URL";
pub const TREE_PATH_VAR: &str = "GUIDE_TREE_PATH";
pub const QUESTION_BANK_PATH_VAR: &str = "GUIDE_QUESTION_BANK_PATH";
pub const REQUIRE_ANSWER_VAR: &str = "GUIDE_REQUIRE_ANSWER";

const DEFAULT_DB_URL: &str = "sqlite://guide.sqlite3?mode=rwc";

/// Settings needed to assemble `AppServices`.
///
/// Asset paths are optional; the bundled question bank and career tree are
/// used when they are unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: String,
    pub tree_path: Option<PathBuf>,
    pub question_bank_path: Option<PathBuf>,
    pub require_answer: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_url: DEFAULT_DB_URL.to_string(),
            tree_path: None,
            question_bank_path: None,
            require_answer: true,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Empty` for a blank database URL and
    /// `ConfigError::InvalidBool` for an unparseable answer flag.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DB_URL_VAR) {
            if raw.trim().is_empty() {
                return Err(ConfigError::Empty { var: DB_URL_VAR });
            }
            config.db_url = normalize_sqlite_url(&raw);
        }
        config.tree_path = non_empty_path(lookup(TREE_PATH_VAR));
        config.question_bank_path = non_empty_path(lookup(QUESTION_BANK_PATH_VAR));
        if let Some(raw) = lookup(REQUIRE_ANSWER_VAR) {
            config.require_answer = parse_bool(REQUIRE_ANSWER_VAR, &raw)?;
        }

        Ok(config)
    }

    /// Load the career tree from `tree_path`, or the bundled one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or fails validation.
    pub fn load_tree(&self) -> Result<PathTree, ConfigError> {
        match &self.tree_path {
            Some(path) => Ok(PathTree::from_json(&read_asset(path)?)?),
            None => Ok(PathTree::builtin()?),
        }
    }

    /// Load the subject catalog from `question_bank_path`, or the bundled one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or fails validation.
    pub fn load_catalog(&self) -> Result<SubjectCatalog, ConfigError> {
        match &self.question_bank_path {
            Some(path) => Ok(SubjectCatalog::from_json(&read_asset(path)?)?),
            None => Ok(SubjectCatalog::builtin()?),
        }
    }
}

/// Turn a bare or relative `SQLite` location into an absolute `sqlite://` URL
/// that creates the database file on first use.
///
/// In-memory URLs and URLs that already use `sqlite://` are left alone.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }
    if trimmed.starts_with("sqlite:file:") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}?mode=rwc", absolute.display())
}

fn non_empty_path(raw: Option<String>) -> Option<PathBuf> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| PathBuf::from(value.trim()))
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            raw: raw.to_string(),
        }),
    }
}

fn read_asset(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}
