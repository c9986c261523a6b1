//! # simpledb
//!
//! A minimal file-backed record store. Each database is a directory, each
//! table a JSON document holding its column schema and its rows:
//!
//! ```text
//! <base_dir>/<database>/<table>.json
//! {"columns": [{"name": "id", "type": "int"}, ...], "rows": [{"id": 1, ...}, ...]}
//! ```
//!
//! Inserts are validated against the schema and rewrite the whole file.
//! Reads always go back to the file. There is no locking, indexing or
//! transaction support.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use simpledb_core::{Config, ColumnType, Predicate, Schema, Value};
//!
//! let config = Config::new("/tmp/simpledb");
//! let mut db = simpledb_core::create_database(&config, "library").unwrap();
//!
//! let authors = db
//!     .create_table(
//!         "authors",
//!         Schema::new()
//!             .column("id", ColumnType::Int)
//!             .column("name", ColumnType::Str)
//!             .column("birth_date", ColumnType::Date),
//!     )
//!     .unwrap();
//!
//! authors
//!     .insert(&[
//!         Value::from(1),
//!         Value::from("Jorge Luis Borges"),
//!         Value::from(NaiveDate::from_ymd_opt(1899, 8, 24).unwrap()),
//!     ])
//!     .unwrap();
//!
//! let borges = authors
//!     .query(&Predicate::new().equals("id", 1))
//!     .unwrap()
//!     .next()
//!     .unwrap();
//! assert_eq!(borges["birth_date"], "1899-08-24");
//! ```

pub mod codec;
pub mod config;
pub mod database;
pub mod error;
pub mod row;
pub mod storage;
pub mod table;
pub mod types;

pub use config::Config;
pub use database::Database;
pub use error::{Error, Result, StorageError, ValidationError};
pub use row::Row;
pub use table::{Predicate, Rows, Table};
pub use types::{ColumnDef, ColumnType, Schema, Value};

/// Create the directory for database `name` and connect to it.
///
/// Fails with [`ValidationError::DatabaseExists`] if it already exists.
pub fn create_database(config: &Config, name: &str) -> Result<Database> {
    Database::create(config, name)?;
    connect_database(config, name)
}

/// Connect to an existing database, loading every table in its directory.
pub fn connect_database(config: &Config, name: &str) -> Result<Database> {
    Database::open(config, name)
}
