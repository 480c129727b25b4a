//! Difference document iterator (positive minus subtrahends).

use crate::error::Result;
use crate::search::doc_iterator::{DocId, DocIterator, INVALID_DOC_ID};

/// Emits the positive child's documents, skipping any matched by a
/// subtrahend. The score of an emitted document is the positive child's.
#[derive(Debug)]
pub struct AndNotIterator {
    positive: Box<dyn DocIterator>,
    subtrahends: Vec<Box<dyn DocIterator>>,
    current_doc: DocId,
    exhausted: bool,
}

impl AndNotIterator {
    /// Create a difference iterator positioned on the first surviving document.
    pub fn new(
        positive: Box<dyn DocIterator>,
        subtrahends: Vec<Box<dyn DocIterator>>,
    ) -> Result<Self> {
        let mut iter = AndNotIterator {
            positive,
            subtrahends,
            current_doc: 0,
            exhausted: false,
        };
        iter.seek_valid()?;
        Ok(iter)
    }

    fn is_excluded(&mut self, doc_id: DocId) -> Result<bool> {
        for subtrahend in &mut self.subtrahends {
            if subtrahend.doc_id() < doc_id {
                subtrahend.advance_to(doc_id)?;
            }
            if subtrahend.doc_id() == doc_id {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Walk the positive child forward to the next non-excluded document.
    fn seek_valid(&mut self) -> Result<bool> {
        loop {
            let doc_id = self.positive.doc_id();
            if doc_id == INVALID_DOC_ID {
                self.exhausted = true;
                self.current_doc = INVALID_DOC_ID;
                return Ok(false);
            }

            if !self.is_excluded(doc_id)? {
                self.current_doc = doc_id;
                return Ok(true);
            }

            if !self.positive.next()? {
                self.exhausted = true;
                self.current_doc = INVALID_DOC_ID;
                return Ok(false);
            }
        }
    }
}

impl DocIterator for AndNotIterator {
    fn doc_id(&self) -> DocId {
        if self.exhausted {
            INVALID_DOC_ID
        } else {
            self.current_doc
        }
    }

    fn next(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if !self.positive.next()? {
            self.exhausted = true;
            self.current_doc = INVALID_DOC_ID;
            return Ok(false);
        }
        self.seek_valid()
    }

    fn advance_to(&mut self, target: DocId) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if target <= self.current_doc {
            return Ok(true);
        }
        if !self.positive.advance_to(target)? {
            self.exhausted = true;
            self.current_doc = INVALID_DOC_ID;
            return Ok(false);
        }
        self.seek_valid()
    }

    fn score(&self) -> f32 {
        self.positive.score()
    }

    fn cost(&self) -> u64 {
        self.positive.cost()
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
