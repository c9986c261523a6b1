//! Storage: the on-disk table document and its file I/O.

pub mod file;

pub use file::{StoredRow, TableDocument, TableFile};
