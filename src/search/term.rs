//! Leaf iterator over a single term's posting list.

use crate::error::Result;
use crate::index::reader::PostingIterator;
use crate::schema::ColumnId;
use crate::search::doc_iterator::{DocId, DocIterator, INVALID_DOC_ID};
use crate::search::scorer::TermScoreParams;

/// A document iterator backed by one posting list.
///
/// Constructed positioned on the first posting. Scoring parameters are
/// installed by the scorer at registration; until then the iterator scores 0.
#[derive(Debug)]
pub struct TermDocIterator {
    posting: Box<dyn PostingIterator>,
    column_id: ColumnId,
    term: String,
    weight: f32,
    doc_freq: u64,
    score_params: Option<TermScoreParams>,
    exhausted: bool,
}

impl TermDocIterator {
    /// Wrap a posting iterator and position it on the first document.
    pub fn new(
        mut posting: Box<dyn PostingIterator>,
        column_id: ColumnId,
        term: String,
        weight: f32,
    ) -> Result<Self> {
        let doc_freq = posting.cost();
        let exhausted = !posting.next()?;
        Ok(TermDocIterator {
            posting,
            column_id,
            term,
            weight,
            doc_freq,
            score_params: None,
            exhausted,
        })
    }

    /// The column this iterator searches.
    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// The term this iterator matches.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The query weight attached to the term leaf.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Number of documents in the posting list.
    pub fn doc_freq(&self) -> u64 {
        self.doc_freq
    }

    /// Term frequency in the current document.
    pub fn term_freq(&self) -> u64 {
        if self.exhausted {
            0
        } else {
            self.posting.term_freq()
        }
    }

    pub(crate) fn set_score_params(&mut self, params: TermScoreParams) {
        self.score_params = Some(params);
    }
}

impl DocIterator for TermDocIterator {
    fn doc_id(&self) -> DocId {
        if self.exhausted {
            INVALID_DOC_ID
        } else {
            self.posting.doc_id()
        }
    }

    fn next(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let has_next = self.posting.next()?;
        if !has_next {
            self.exhausted = true;
        }
        Ok(has_next)
    }

    fn advance_to(&mut self, target: DocId) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let found = self.posting.skip_to(target)?;
        if !found {
            self.exhausted = true;
        }
        Ok(found)
    }

    fn score(&self) -> f32 {
        match self.score_params {
            Some(params) => params.score(self.term_freq()),
            None => 0.0,
        }
    }

    fn cost(&self) -> u64 {
        self.doc_freq
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
