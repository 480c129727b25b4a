//! Reader traits for posting-list access.
//!
//! These are the contracts the iterator factory consumes. Concrete readers
//! (in-memory here, segment files elsewhere) stay behind them.

use std::fmt::Debug;

use crate::error::Result;
use crate::schema::ColumnId;
use crate::search::doc_iterator::DocId;

/// Iterator over a single term's posting list.
///
/// A fresh iterator is positioned before the first posting; the first call to
/// `next` moves onto it.
pub trait PostingIterator: Send + Debug {
    /// Get the current document ID.
    fn doc_id(&self) -> DocId;

    /// Get the term frequency in the current document.
    fn term_freq(&self) -> u64;

    /// Move to the next document.
    fn next(&mut self) -> Result<bool>;

    /// Skip to the first document >= target.
    fn skip_to(&mut self, target: DocId) -> Result<bool>;

    /// Get the cost of iterating through this posting list.
    fn cost(&self) -> u64;
}

/// Per-term statistics used for relevance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermStats {
    /// Number of documents containing the term.
    pub doc_freq: u64,
    /// Total term frequency across all documents.
    pub total_freq: u64,
}

/// The per-column handle into the inverted index.
pub trait ColumnIndexReader: Send + Sync + Debug {
    /// Look up a term; `None` means the term does not occur in this column.
    fn lookup(&self, term: &str) -> Option<Box<dyn PostingIterator>>;

    /// Get statistics for a term, if present.
    fn term_stats(&self, term: &str) -> Option<TermStats>;

    /// Number of documents indexed in this column.
    fn doc_count(&self) -> u64;
}

/// Reader over all indexed columns of a table.
pub trait IndexReader: Send + Sync + Debug {
    /// Get the reader for a column; `None` means the column is not indexed.
    fn column_index_reader(&self, column_id: ColumnId) -> Option<&dyn ColumnIndexReader>;

    /// Total number of documents visible to this reader.
    fn total_docs(&self) -> u64;
}
