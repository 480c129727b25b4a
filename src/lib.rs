//! # sagitta
//!
//! Boolean query planner and execution tree for an inverted-index full-text
//! search subsystem.
//!
//! The crate takes an arbitrary boolean query tree produced by a parser,
//! normalizes it into a canonical executable form (introducing the derived
//! `AND_NOT` operator along the way), and maps the result onto a tree of
//! posting-list document iterators wired into a BM25 scorer.
//!
//! ```
//! use sagitta::{create_search, normalize, DocIterator, QueryNode, Scorer, Table};
//! use sagitta::index::{MemoryColumnIndex, MemoryIndexReader};
//!
//! let table = Table::new("docs").with_column("body");
//! let mut body = MemoryColumnIndex::new();
//! body.add_term("rust", &[0, 1, 2]);
//! body.add_term("cpp", &[1]);
//! let reader = MemoryIndexReader::new().with_column(0, body);
//!
//! // body:rust AND NOT body:cpp
//! let tree = normalize(QueryNode::and(vec![
//!     QueryNode::term("body", "rust"),
//!     QueryNode::not(vec![QueryNode::term("body", "cpp")]),
//! ]))
//! .unwrap();
//!
//! let mut scorer = Scorer::new(3);
//! let mut iter = create_search(&tree, &table, &reader, &mut scorer)
//!     .unwrap()
//!     .expect("query matches");
//!
//! assert_eq!(iter.doc_id(), 0);
//! assert!(iter.next().unwrap());
//! assert_eq!(iter.doc_id(), 2);
//! assert!(!iter.next().unwrap());
//! ```

pub mod error;
pub mod index;
pub mod query;
pub mod schema;
pub mod search;

pub use error::{Result, SagittaError};
pub use index::{ColumnIndexReader, IndexReader, Posting, PostingIterator};
pub use query::{create_search, normalize, QueryNode, QueryNodeKind};
pub use schema::{Column, ColumnId, Table};
pub use search::{DocId, DocIterator, Scorer, INVALID_DOC_ID};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
