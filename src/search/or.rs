//! Disjunctive document iterator (union by doc id).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::search::doc_iterator::{DocId, DocIterator, INVALID_DOC_ID};

/// Heap entry ordering children by their current doc id, lowest first.
#[derive(Debug)]
struct IteratorEntry {
    iter: Box<dyn DocIterator>,
}

impl PartialEq for IteratorEntry {
    fn eq(&self, other: &Self) -> bool {
        self.iter.doc_id() == other.iter.doc_id()
    }
}

impl Eq for IteratorEntry {}

impl PartialOrd for IteratorEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IteratorEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: lower doc IDs come first.
        other.iter.doc_id().cmp(&self.iter.doc_id())
    }
}

/// Unions two or more child iterators.
///
/// Emits each doc id matched by at least one child exactly once; the score is
/// the sum of the scores of the children sitting on that doc.
#[derive(Debug)]
pub struct OrIterator {
    heap: BinaryHeap<IteratorEntry>,
    current_doc: DocId,
    exhausted: bool,
    cost: u64,
}

impl OrIterator {
    /// Create a disjunction positioned on the lowest child doc id.
    pub fn new(children: Vec<Box<dyn DocIterator>>) -> Self {
        let mut heap = BinaryHeap::with_capacity(children.len());
        let mut cost = 0;
        for child in children {
            if !child.is_exhausted() {
                cost += child.cost();
                heap.push(IteratorEntry { iter: child });
            }
        }

        let current_doc = heap
            .peek()
            .map_or(INVALID_DOC_ID, |entry| entry.iter.doc_id());

        OrIterator {
            exhausted: heap.is_empty(),
            heap,
            current_doc,
            cost,
        }
    }

    /// Pop every child sitting on the current doc, advance it, reinsert.
    fn advance_current_children(&mut self, target_next: Option<DocId>) -> Result<()> {
        let mut advanced = Vec::new();
        while let Some(entry) = self.heap.peek() {
            let doc_id = entry.iter.doc_id();
            let behind = match target_next {
                Some(target) => doc_id < target,
                None => doc_id == self.current_doc,
            };
            if !behind {
                break;
            }
            let mut entry = match self.heap.pop() {
                Some(entry) => entry,
                None => break,
            };
            let still_live = match target_next {
                Some(target) => entry.iter.advance_to(target)?,
                None => entry.iter.next()?,
            };
            if still_live {
                advanced.push(entry);
            }
        }
        for entry in advanced {
            self.heap.push(entry);
        }

        match self.heap.peek() {
            Some(entry) => self.current_doc = entry.iter.doc_id(),
            None => {
                self.current_doc = INVALID_DOC_ID;
                self.exhausted = true;
            }
        }
        Ok(())
    }
}

impl DocIterator for OrIterator {
    fn doc_id(&self) -> DocId {
        self.current_doc
    }

    fn next(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        self.advance_current_children(None)?;
        Ok(!self.exhausted)
    }

    fn advance_to(&mut self, target: DocId) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if target <= self.current_doc {
            return Ok(true);
        }
        self.advance_current_children(Some(target))?;
        Ok(!self.exhausted)
    }

    fn score(&self) -> f32 {
        self.heap
            .iter()
            .filter(|entry| entry.iter.doc_id() == self.current_doc)
            .map(|entry| entry.iter.score())
            .sum()
    }

    fn cost(&self) -> u64 {
        self.cost
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::memory::MemoryPostingIterator;
    use crate::index::posting::Posting;
    use crate::search::term::TermDocIterator;

    fn leaf(doc_ids: &[DocId]) -> Box<dyn DocIterator> {
        let postings = doc_ids.iter().map(|&d| Posting::new(d)).collect();
        Box::new(
            TermDocIterator::new(
                Box::new(MemoryPostingIterator::new(postings)),
                0,
                "t".to_string(),
                1.0,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_union_walk_dedups() {
        let mut iter = OrIterator::new(vec![leaf(&[0, 2, 4]), leaf(&[2, 3, 4, 7])]);

        let mut seen = vec![iter.doc_id()];
        while iter.next().unwrap() {
            seen.push(iter.doc_id());
        }
        assert_eq!(seen, vec![0, 2, 3, 4, 7]);
        assert!(iter.is_exhausted());
    }

    #[test]
    fn test_advance_to() {
        let mut iter = OrIterator::new(vec![leaf(&[0, 5, 11]), leaf(&[3, 8, 13])]);

        assert!(iter.advance_to(6).unwrap());
        assert_eq!(iter.doc_id(), 8);
        assert!(iter.advance_to(12).unwrap());
        assert_eq!(iter.doc_id(), 13);
        assert!(!iter.next().unwrap());
    }

    #[test]
    fn test_all_children_empty() {
        let iter = OrIterator::new(vec![leaf(&[]), leaf(&[])]);
        assert!(iter.is_exhausted());
        assert_eq!(iter.doc_id(), INVALID_DOC_ID);
    }
}
