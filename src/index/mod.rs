//! Inverted index access layer.
//!
//! The query planner touches the index only through the reader traits defined
//! here; the in-memory implementations back the tests and embedded use.

pub mod memory;
pub mod posting;
pub mod reader;

pub use memory::{MemoryColumnIndex, MemoryIndexReader, MemoryPostingIterator};
pub use posting::Posting;
pub use reader::{ColumnIndexReader, IndexReader, PostingIterator, TermStats};
