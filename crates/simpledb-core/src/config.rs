//! Where databases live on disk.
//!
//! Each database is a directory directly under `base_dir`; the base directory
//! is passed explicitly to every factory call rather than read from global
//! state.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ValidationError;

/// Environment variable overriding the default base directory.
pub const BASE_DIR_ENV: &str = "SIMPLE_DATABASE_DIR";

/// Directory name used under the platform data directory.
pub const DEFAULT_DIR_NAME: &str = "simple_database";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_dir: PathBuf,
}

impl Config {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// `$SIMPLE_DATABASE_DIR` when set and non-empty, otherwise the default.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(BASE_DIR_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> Self {
        match value {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory backing the database `name`.
    pub fn database_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

/// Check that `name` can be used as a single path component.
///
/// Database and table names become a directory and a file name respectively,
/// so they must be non-empty, not `.` or `..`, and free of separators and NUL.
/// `kind` names what is being checked in the error ("database", "table").
pub fn check_name(kind: &'static str, name: &str) -> Result<(), ValidationError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(ValidationError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME);
        Self { base_dir }
    }
}
