//! Conjunctive document iterator (intersection by doc id).

use crate::error::Result;
use crate::search::doc_iterator::{DocId, DocIterator, INVALID_DOC_ID};

/// Intersects two or more child iterators.
///
/// All children must sit on the same doc id for it to be emitted; the score
/// of an emitted document is the sum of the children's scores.
#[derive(Debug)]
pub struct AndIterator {
    children: Vec<Box<dyn DocIterator>>,
    current_doc: DocId,
    exhausted: bool,
    cost: u64,
}

impl AndIterator {
    /// Create a conjunction and align it on the first common document.
    pub fn new(children: Vec<Box<dyn DocIterator>>) -> Result<Self> {
        let cost = children.iter().map(|c| c.cost()).min().unwrap_or(0);
        let mut iter = AndIterator {
            exhausted: children.is_empty(),
            children,
            current_doc: 0,
            cost,
        };
        if !iter.align()? {
            iter.mark_exhausted();
        }
        Ok(iter)
    }

    fn mark_exhausted(&mut self) {
        self.exhausted = true;
        self.current_doc = INVALID_DOC_ID;
    }

    /// Advance children until they agree on one doc id.
    fn align(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }

        loop {
            let mut max_doc = 0;
            for child in &self.children {
                let doc_id = child.doc_id();
                if doc_id == INVALID_DOC_ID {
                    return Ok(false);
                }
                max_doc = max_doc.max(doc_id);
            }

            let mut all_aligned = true;
            for child in &mut self.children {
                if child.doc_id() < max_doc {
                    if !child.advance_to(max_doc)? {
                        return Ok(false);
                    }
                    if child.doc_id() != max_doc {
                        all_aligned = false;
                    }
                }
            }

            if all_aligned {
                self.current_doc = max_doc;
                return Ok(true);
            }
        }
    }
}

impl DocIterator for AndIterator {
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

        if !self.children[0].next()? {
            self.mark_exhausted();
            return Ok(false);
        }

        let found = self.align()?;
        if !found {
            self.mark_exhausted();
        }
        Ok(found)
    }

    fn advance_to(&mut self, target: DocId) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if target <= self.current_doc {
            return Ok(true);
        }

        if !self.children[0].advance_to(target)? {
            self.mark_exhausted();
            return Ok(false);
        }

        let found = self.align()?;
        if !found {
            self.mark_exhausted();
        }
        Ok(found)
    }

    fn score(&self) -> f32 {
        self.children.iter().map(|c| c.score()).sum()
    }

    fn cost(&self) -> u64 {
        self.cost
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
