//! In-memory inverted index, the crate's concrete reader implementation.

use ahash::AHashMap;

use crate::error::Result;
use crate::index::posting::Posting;
use crate::index::reader::{ColumnIndexReader, IndexReader, PostingIterator, TermStats};
use crate::schema::ColumnId;
use crate::search::doc_iterator::{DocId, INVALID_DOC_ID};

/// Posting iterator over an owned, doc-id-sorted vector.
#[derive(Debug)]
pub struct MemoryPostingIterator {
    postings: Vec<Posting>,
    position: usize,
    started: bool,
}

impl MemoryPostingIterator {
    /// Create a new iterator. Postings must be sorted by doc id.
    pub fn new(postings: Vec<Posting>) -> Self {
        MemoryPostingIterator {
            postings,
            position: 0,
            started: false,
        }
    }

    fn current(&self) -> Option<&Posting> {
        if self.started {
            self.postings.get(self.position)
        } else {
            None
        }
    }
}

impl PostingIterator for MemoryPostingIterator {
    fn doc_id(&self) -> DocId {
        self.current().map_or(INVALID_DOC_ID, |p| p.doc_id)
    }

    fn term_freq(&self) -> u64 {
        self.current().map_or(0, |p| u64::from(p.frequency))
    }

    fn next(&mut self) -> Result<bool> {
        if !self.started {
            self.started = true;
        } else if self.position < self.postings.len() {
            self.position += 1;
        }
        Ok(self.position < self.postings.len())
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        self.started = true;

        // Binary search for the first doc_id >= target.
        let mut left = self.position;
        let mut right = self.postings.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.postings[mid].doc_id >= target {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        self.position = left;
        Ok(self.position < self.postings.len())
    }

    fn cost(&self) -> u64 {
        self.postings.len() as u64
    }
}

/// An in-memory single-column inverted index.
#[derive(Debug, Default)]
pub struct MemoryColumnIndex {
    terms: AHashMap<String, Vec<Posting>>,
    doc_count: u64,
}

impl MemoryColumnIndex {
    /// Create an empty column index.
    pub fn new() -> Self {
        MemoryColumnIndex::default()
    }

    /// Add a posting for a term, keeping the list sorted by doc id.
    pub fn add_posting<S: Into<String>>(&mut self, term: S, posting: Posting) {
        self.doc_count = self.doc_count.max(posting.doc_id + 1);
        let postings = self.terms.entry(term.into()).or_default();
        let at = postings.partition_point(|p| p.doc_id < posting.doc_id);
        postings.insert(at, posting);
    }

    /// Add one posting per doc id with frequency 1.
    pub fn add_term(&mut self, term: &str, doc_ids: &[DocId]) {
        for &doc_id in doc_ids {
            self.add_posting(term, Posting::new(doc_id));
        }
    }
}

impl ColumnIndexReader for MemoryColumnIndex {
    fn lookup(&self, term: &str) -> Option<Box<dyn PostingIterator>> {
        self.terms
            .get(term)
            .map(|postings| Box::new(MemoryPostingIterator::new(postings.clone())) as Box<dyn PostingIterator>)
    }

    fn term_stats(&self, term: &str) -> Option<TermStats> {
        self.terms.get(term).map(|postings| TermStats {
            doc_freq: postings.len() as u64,
            total_freq: postings.iter().map(|p| u64::from(p.frequency)).sum(),
        })
    }

    fn doc_count(&self) -> u64 {
        self.doc_count
    }
}

/// An in-memory reader over a set of column indexes.
#[derive(Debug, Default)]
pub struct MemoryIndexReader {
    columns: AHashMap<ColumnId, MemoryColumnIndex>,
    total_docs: u64,
}

impl MemoryIndexReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        MemoryIndexReader::default()
    }

    /// Install a column index under the given column id.
    pub fn insert_column(&mut self, column_id: ColumnId, index: MemoryColumnIndex) {
        self.total_docs = self.total_docs.max(index.doc_count());
        self.columns.insert(column_id, index);
    }

    /// Builder-style variant of [`insert_column`](Self::insert_column).
    pub fn with_column(mut self, column_id: ColumnId, index: MemoryColumnIndex) -> Self {
        self.insert_column(column_id, index);
        self
    }
}

impl IndexReader for MemoryIndexReader {
    fn column_index_reader(&self, column_id: ColumnId) -> Option<&dyn ColumnIndexReader> {
        self.columns
            .get(&column_id)
            .map(|index| index as &dyn ColumnIndexReader)
    }

    fn total_docs(&self) -> u64 {
        self.total_docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_iterator_walk() {
        let mut index = MemoryColumnIndex::new();
        index.add_term("rust", &[0, 2, 4, 6, 8]);

        let mut iter = index.lookup("rust").unwrap();
        assert_eq!(iter.cost(), 5);
        assert_eq!(iter.doc_id(), INVALID_DOC_ID);

        assert!(iter.next().unwrap());
        assert_eq!(iter.doc_id(), 0);

        assert!(iter.skip_to(5).unwrap());
        assert_eq!(iter.doc_id(), 6);

        assert!(iter.next().unwrap());
        assert_eq!(iter.doc_id(), 8);

        assert!(!iter.next().unwrap());
        assert_eq!(iter.doc_id(), INVALID_DOC_ID);
    }

    #[test]
    fn test_skip_to_exact_and_past_end() {
        let mut index = MemoryColumnIndex::new();
        index.add_term("rust", &[1, 3, 5]);

        let mut iter = index.lookup("rust").unwrap();
        assert!(iter.skip_to(3).unwrap());
        assert_eq!(iter.doc_id(), 3);
        assert!(!iter.skip_to(9).unwrap());
        assert_eq!(iter.doc_id(), INVALID_DOC_ID);
    }

    #[test]
    fn test_missing_term_and_stats() {
        let mut index = MemoryColumnIndex::new();
        index.add_posting("rust", Posting::new(0).with_frequency(2));
        index.add_posting("rust", Posting::new(3).with_frequency(1));

        assert!(index.lookup("python").is_none());
        assert!(index.term_stats("python").is_none());

        let stats = index.term_stats("rust").unwrap();
        assert_eq!(stats.doc_freq, 2);
        assert_eq!(stats.total_freq, 3);
        assert_eq!(index.doc_count(), 4);
    }

    #[test]
    fn test_reader_column_routing() {
        let mut title = MemoryColumnIndex::new();
        title.add_term("hello", &[0, 1]);

        let reader = MemoryIndexReader::new().with_column(0, title);

        assert!(reader.column_index_reader(0).is_some());
        assert!(reader.column_index_reader(9).is_none());
        assert_eq!(reader.total_docs(), 2);
    }
}
