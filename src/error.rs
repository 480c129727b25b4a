//! Error types for the sagitta library.
//!
//! All failures are represented by the [`SagittaError`] enum. Query
//! normalization errors are fatal for the query that raised them: the caller
//! gets the error and no partial tree.
//!
//! # Examples
//!
//! ```
//! use sagitta::error::{Result, SagittaError};
//!
//! fn reject() -> Result<()> {
//!     Err(SagittaError::malformed_tree("AND node requires at least 2 children"))
//! }
//!
//! assert!(reject().is_err());
//! ```

use std::io;

use thiserror::Error;

use crate::query::node::QueryNodeKind;

/// The main error type for sagitta operations.
#[derive(Error, Debug)]
pub enum SagittaError {
    /// I/O errors surfaced by index readers.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Index-related errors (posting list access, reader state).
    #[error("Index error: {0}")]
    Index(String),

    /// A query tree violates the structural preconditions of normalization.
    #[error("Malformed query tree: {0}")]
    MalformedTree(String),

    /// A disjunction mixes positive and negated branches.
    #[error("Unsupported disjunction: {0}")]
    UnsupportedDisjunction(String),

    /// A child kind appeared where the rewrite rules forbid it.
    #[error("Unexpected {child} child under {parent} node")]
    UnexpectedKind {
        /// The composite kind being rewritten.
        parent: QueryNodeKind,
        /// The offending child kind.
        child: QueryNodeKind,
    },

    /// A non-canonical node reached the iterator factory.
    #[error("Invalid normalization: {0}")]
    InvalidNormalization(String),

    /// Requested functionality is not implemented.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Generic anyhow error at the crate boundary.
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`SagittaError`].
pub type Result<T> = std::result::Result<T, SagittaError>;

impl SagittaError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SagittaError::Index(msg.into())
    }

    /// Create a new malformed-tree error.
    pub fn malformed_tree<S: Into<String>>(msg: S) -> Self {
        SagittaError::MalformedTree(msg.into())
    }

    /// Create a new unsupported-disjunction error.
    pub fn unsupported_disjunction<S: Into<String>>(msg: S) -> Self {
        SagittaError::UnsupportedDisjunction(msg.into())
    }

    /// Create a new unexpected-kind error.
    pub fn unexpected_kind(parent: QueryNodeKind, child: QueryNodeKind) -> Self {
        SagittaError::UnexpectedKind { parent, child }
    }

    /// Create a new invalid-normalization error.
    pub fn invalid_normalization<S: Into<String>>(msg: S) -> Self {
        SagittaError::InvalidNormalization(msg.into())
    }

    /// Create a new not-implemented error.
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        SagittaError::NotImplemented(msg.into())
    }
}
