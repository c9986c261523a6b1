use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::types::Schema;

/// A stored row: column name to JSON value, in column order.
pub type StoredRow = Map<String, Value>;

/// The full contents of one table file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub columns: Schema,
    pub rows: Vec<StoredRow>,
}

impl TableDocument {
    /// An empty table with the given columns.
    pub fn empty(columns: Schema) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }
}

/// File I/O for a single table document.
///
/// Every call opens, uses and closes its own handle; nothing is cached
/// between calls, so changes made by other writers are seen on the next read.
#[derive(Debug, Clone)]
pub struct TableFile {
    path: PathBuf,
}

impl TableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the file holding an empty table. Fails if it already exists.
    pub fn create(&self, columns: &Schema) -> Result<(), StorageError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        let doc = TableDocument::empty(columns.clone());
        write_document(file, &doc)
    }

    /// Read and parse the whole document.
    pub fn read(&self) -> Result<TableDocument, StorageError> {
        let file = File::open(&self.path)?;
        let doc = serde_json::from_reader(BufReader::new(file))?;
        Ok(doc)
    }

    /// Replace the file contents with `doc`.
    pub fn write(&self, doc: &TableDocument) -> Result<(), StorageError> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        write_document(file, doc)
    }

    /// Read-modify-write: append one row and rewrite the whole file.
    ///
    /// Returns the row count after the append.
    pub fn append_row(&self, row: StoredRow) -> Result<usize, StorageError> {
        let mut doc = self.read()?;
        doc.rows.push(row);
        self.write(&doc)?;
        Ok(doc.rows.len())
    }
}

fn write_document(file: File, doc: &TableDocument) -> Result<(), StorageError> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}
