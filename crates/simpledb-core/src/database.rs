//! Database registry: a directory of table files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{Config, check_name};
use crate::error::{Error, StorageError, ValidationError};
use crate::table::Table;
use crate::types::{Schema, TABLE_FILE_EXTENSION};

/// Handle to one database directory and the tables found in it.
#[derive(Debug)]
pub struct Database {
    name: String,
    path: PathBuf,
    /// Known table names, kept sorted.
    tables: Vec<String>,
    handles: HashMap<String, Table>,
}

impl Database {
    /// Create the directory for a new, empty database.
    ///
    /// Fails with a validation error if the directory already exists. Does not
    /// open the database; see [`crate::create_database`].
    pub fn create(config: &Config, name: &str) -> Result<(), Error> {
        check_name("database", name)?;
        let path = config.database_path(name);
        if path.exists() {
            return Err(ValidationError::DatabaseExists(name.to_string()).into());
        }
        fs::create_dir_all(&path)?;
        info!(db = name, path = %path.display(), "created database");
        Ok(())
    }

    /// Open an existing database directory and load every table file in it.
    pub fn open(config: &Config, name: &str) -> Result<Self, Error> {
        check_name("database", name)?;
        let path = config.database_path(name);
        if !path.is_dir() {
            return Err(StorageError::DatabaseNotFound(path).into());
        }

        let tables = discover_tables(&path)?;
        let mut handles = HashMap::with_capacity(tables.len());
        for table_name in &tables {
            let table = Table::open(&path, table_name, None)?;
            handles.insert(table_name.clone(), table);
        }
        debug!(db = name, tables = tables.len(), "opened database");

        Ok(Self {
            name: name.to_string(),
            path,
            tables,
            handles,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a table with `schema` and register a handle to it.
    ///
    /// The name must be usable as a file name: empty names, `.`, `..` and
    /// names containing path separators or NUL are rejected.
    pub fn create_table(&mut self, name: &str, schema: Schema) -> Result<&Table, Error> {
        check_name("table", name)?;
        let pos = match self.tables.binary_search_by(|t| t.as_str().cmp(name)) {
            Ok(_) => {
                return Err(ValidationError::TableExists {
                    table: name.to_string(),
                    db: self.name.clone(),
                }
                .into());
            }
            Err(pos) => pos,
        };

        let table = Table::open(&self.path, name, Some(schema))?;
        self.tables.insert(pos, name.to_string());
        info!(db = %self.name, table = name, columns = table.describe().len(), "created table");
        Ok(self.handles.entry(name.to_string()).or_insert(table))
    }

    /// Names of the known tables.
    ///
    /// Ordered by name, not by creation, so the list is the same after the
    /// database is reopened.
    pub fn show_tables(&self) -> &[String] {
        &self.tables
    }

    /// Named handle to a known table.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.handles.get(name)
    }

    /// Handles to every known table, in [`Database::show_tables`] order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter_map(|name| self.handles.get(name))
    }
}

/// Table names derived from the `*.json` files in `dir`, sorted.
fn discover_tables(dir: &Path) -> Result<Vec<String>, Error> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(TABLE_FILE_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}
