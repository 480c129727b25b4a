//! Table catalog used to resolve column names during query planning.
//!
//! The catalog is read-only for the duration of a query; the iterator factory
//! consults it to map the column names carried by term leaves onto the column
//! ids understood by the index reader.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Identifier of a column within a table.
pub type ColumnId = u32;

/// A single column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// The column id, dense and zero-based within its table.
    pub id: ColumnId,
    /// The column name.
    pub name: String,
}

/// An ordered collection of columns with by-name lookup.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    by_name: AHashMap<String, ColumnId>,
}

impl Table {
    /// Create an empty table catalog entry.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Table {
            name: name.into(),
            columns: Vec::new(),
            by_name: AHashMap::new(),
        }
    }

    /// Append a column; its id is the next dense id.
    pub fn with_column<S: Into<String>>(mut self, name: S) -> Self {
        self.add_column(name);
        self
    }

    /// Append a column; its id is the next dense id.
    pub fn add_column<S: Into<String>>(&mut self, name: S) -> ColumnId {
        let id = self.columns.len() as ColumnId;
        let name = name.into();
        self.by_name.insert(name.clone(), id);
        self.columns.push(Column { id, name });
        id
    }

    /// Resolve a column name to its id.
    pub fn column_id_by_name(&self, name: &str) -> Option<ColumnId> {
        self.by_name.get(name).copied()
    }

    /// Get the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the ordered column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}
