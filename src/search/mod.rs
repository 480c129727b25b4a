//! Document iterators and relevance scoring.
//!
//! The iterator factory composes these over per-column posting lists: term
//! leaves become [`TermDocIterator`], conjunctions intersect via
//! [`AndIterator`], disjunctions union via [`OrIterator`], and differences
//! subtract via [`AndNotIterator`].

pub mod and;
pub mod and_not;
pub mod doc_iterator;
pub mod or;
pub mod scorer;
pub mod term;

pub use and::AndIterator;
pub use and_not::AndNotIterator;
pub use doc_iterator::{DocId, DocIterator, INVALID_DOC_ID};
pub use or::OrIterator;
pub use scorer::{Scorer, ScorerRegistration, TermScoreParams};
pub use term::TermDocIterator;
