//! Table engine: one table's schema plus its backing JSON file.
//!
//! No rows are held in memory. Each operation opens the file, does a full
//! read (and for `insert`, a full rewrite) and closes it again, so a second
//! handle or another process writing the same file is visible on the next
//! call. There is no locking: concurrent writers can lose updates.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::codec;
use crate::config::check_name;
use crate::error::{Error, StorageError};
use crate::row::Row;
use crate::storage::{StoredRow, TableFile};
use crate::types::{Schema, TABLE_FILE_EXTENSION, Value};

/// Exact-match filter: column name to expected value.
///
/// Every listed column must equal its value; columns not listed match
/// anything. An empty predicate matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: BTreeMap<String, Value>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column == value`. A later condition on the same column
    /// replaces the earlier one.
    pub fn equals(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.insert(column.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn encode(&self) -> Vec<(String, serde_json::Value)> {
        self.conditions
            .iter()
            .map(|(column, value)| (column.clone(), codec::to_json(value)))
            .collect()
    }
}

/// Handle to one table.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    schema: Schema,
    file: TableFile,
}

impl Table {
    /// Open the table `name` inside the database directory `db_dir`.
    ///
    /// If the backing file is missing it is created empty with `schema`,
    /// which is then required. If the file exists and `schema` is given, the
    /// given schema is used as-is without reading the file; otherwise the
    /// columns are loaded from it.
    /// Fails with a validation error if `name` is not a plain file name.
    pub fn open(db_dir: &Path, name: &str, schema: Option<Schema>) -> Result<Self, Error> {
        check_name("table", name)?;
        let file = TableFile::new(db_dir.join(format!("{name}.{TABLE_FILE_EXTENSION}")));

        let schema = match schema {
            Some(schema) => {
                if !file.exists() {
                    file.create(&schema)?;
                    debug!(table = name, path = %file.path().display(), "created table file");
                }
                schema
            }
            None if file.exists() => file.read()?.columns,
            None => {
                return Err(StorageError::SchemaRequired {
                    table: name.to_string(),
                }
                .into());
            }
        };

        Ok(Self {
            name: name.to_string(),
            schema,
            file,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The column definitions this table was opened with.
    pub fn describe(&self) -> &Schema {
        &self.schema
    }

    /// Validate `values` against the schema and append them as a new row.
    ///
    /// Nothing is written when validation fails.
    pub fn insert(&self, values: &[Value]) -> Result<(), Error> {
        codec::validate(&self.schema, values)?;
        let row = codec::format_row(&self.schema, values);
        let rows = self.file.append_row(row)?;
        debug!(table = %self.name, rows, "inserted row");
        Ok(())
    }

    /// Rows whose stored values equal every condition in `predicate`.
    ///
    /// The file is read once per call; the returned iterator filters lazily
    /// over that read. Calling again re-reads the current file.
    pub fn query(&self, predicate: &Predicate) -> Result<Rows, Error> {
        let doc = self.file.read()?;
        debug!(
            table = %self.name,
            rows = doc.rows.len(),
            conditions = predicate.conditions.len(),
            "query"
        );
        Ok(Rows {
            table: self.name.clone(),
            rows: doc.rows.into_iter(),
            conditions: predicate.encode(),
        })
    }

    /// Every row, in insertion order.
    pub fn all(&self) -> Result<Rows, Error> {
        self.query(&Predicate::new())
    }

    /// Number of stored rows, read fresh from the file.
    pub fn count(&self) -> Result<usize, Error> {
        Ok(self.file.read()?.rows.len())
    }
}

/// Lazy result sequence of a [`Table::query`].
#[derive(Debug)]
pub struct Rows {
    table: String,
    rows: std::vec::IntoIter<StoredRow>,
    conditions: Vec<(String, serde_json::Value)>,
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let conditions = &self.conditions;
        let fields = self.rows.by_ref().find(|row| row_matches(row, conditions))?;
        Some(Row::new(&self.table, fields))
    }
}

fn row_matches(row: &StoredRow, conditions: &[(String, serde_json::Value)]) -> bool {
    conditions.iter().all(|(column, expected)| {
        row.get(column)
            .is_some_and(|stored| codec::stored_eq(stored, expected))
    })
}
