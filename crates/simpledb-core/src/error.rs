//! Error types for all simpledb operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for simpledb operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// Whether this error was raised by a caller-facing validation rule
    /// (duplicate database/table, bad row) rather than by the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Rejections the caller can act on. `Display` is the exact message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Database with name \"{0}\" already exists.")]
    DatabaseExists(String),

    #[error("Table with name \"{table}\" in DB \"{db}\" already exist.")]
    TableExists { table: String, db: String },

    #[error("Invalid amount of fields.")]
    FieldCount { expected: usize, actual: usize },

    #[error("Invalid type of field \"{column}\": Given \"{given}\", expected \"{expected}\"")]
    FieldType {
        column: String,
        given: &'static str,
        expected: &'static str,
    },

    #[error("Invalid value of field \"{column}\": {reason}")]
    InvalidValue { column: String, reason: String },

    #[error("Invalid {kind} name \"{name}\".")]
    InvalidName { kind: &'static str, name: String },
}

impl ValidationError {
    /// The human-readable message carried by this error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("table '{table}' has no backing file and no schema was given")]
    SchemaRequired { table: String },

    #[error("database directory not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Storage(StorageError::Io(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Storage(StorageError::Serialization(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
