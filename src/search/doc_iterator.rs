//! The document iterator trait shared by all execution-tree nodes.

use std::fmt::Debug;

use crate::error::Result;

/// Identifier of a document within the index.
pub type DocId = u64;

/// Sentinel doc id returned by exhausted iterators.
pub const INVALID_DOC_ID: DocId = DocId::MAX;

/// Trait for document iterators.
///
/// A freshly constructed iterator is positioned on its first matching
/// document, or exhausted if there is none.
pub trait DocIterator: Send + Debug {
    /// Get the current document ID, or [`INVALID_DOC_ID`] when exhausted.
    fn doc_id(&self) -> DocId;

    /// Move to the next matching document.
    fn next(&mut self) -> Result<bool>;

    /// Advance to the first matching document >= target.
    fn advance_to(&mut self, target: DocId) -> Result<bool>;

    /// Relevance score of the current document.
    fn score(&self) -> f32;

    /// Get the cost of iterating through this iterator.
    fn cost(&self) -> u64;

    /// Check if this iterator is exhausted.
    fn is_exhausted(&self) -> bool {
        self.doc_id() == INVALID_DOC_ID
    }
}
