//! Posting data for a single term occurrence list.

use serde::{Deserialize, Serialize};

use crate::search::doc_iterator::DocId;

/// A single posting in a posting list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub doc_id: DocId,
    /// Term frequency in the document.
    pub frequency: u32,
    /// Positions of the term in the document (for phrase evaluation).
    pub positions: Option<Vec<u32>>,
}

impl Posting {
    /// Create a new posting with frequency 1 and no positions.
    pub fn new(doc_id: DocId) -> Self {
        Posting {
            doc_id,
            frequency: 1,
            positions: None,
        }
    }

    /// Set the term frequency.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the term positions.
    pub fn with_positions(mut self, positions: Vec<u32>) -> Self {
        self.positions = Some(positions);
        self
    }
}
