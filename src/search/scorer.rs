//! BM25 relevance scoring.
//!
//! The scorer is owned by the query planner for the duration of planning.
//! Term iterators are registered with it in the left-to-right order they
//! appear in the normalized tree; registration computes the term's scoring
//! parameters and installs them on the iterator.

use crate::schema::ColumnId;
use crate::search::term::TermDocIterator;

/// Per-term parameters installed on a term iterator at registration time.
#[derive(Debug, Clone, Copy)]
pub struct TermScoreParams {
    idf: f32,
    k1: f32,
    boost: f32,
}

impl TermScoreParams {
    /// Score a document given its term frequency.
    ///
    /// Document length is approximated by the column average, so the BM25
    /// length normalization factor collapses to 1.
    pub fn score(&self, term_freq: u64) -> f32 {
        if term_freq == 0 {
            return 0.0;
        }
        let tf = term_freq as f32;
        let tf_component = (tf * (self.k1 + 1.0)) / (tf + self.k1);
        self.boost * self.idf * tf_component
    }
}

/// Record of one term iterator registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerRegistration {
    /// The column the term iterator searches.
    pub column_id: ColumnId,
    /// The registered term.
    pub term: String,
}

/// BM25 scorer.
#[derive(Debug)]
pub struct Scorer {
    total_docs: u64,
    k1: f32,
    b: f32,
    registrations: Vec<ScorerRegistration>,
}

impl Scorer {
    /// Create a scorer with the default BM25 parameters (k1 = 1.2, b = 0.75).
    pub fn new(total_docs: u64) -> Self {
        Scorer::with_params(total_docs, 1.2, 0.75)
    }

    /// Create a scorer with custom BM25 parameters.
    pub fn with_params(total_docs: u64, k1: f32, b: f32) -> Self {
        Scorer {
            total_docs,
            k1,
            b,
            registrations: Vec::new(),
        }
    }

    /// Register a term iterator under its column id.
    ///
    /// Computes the term's IDF from its posting-list size, installs the
    /// scoring parameters on the iterator, and appends a registration record.
    pub fn add_doc_iterator(&mut self, iter: &mut TermDocIterator, column_id: ColumnId) {
        let params = TermScoreParams {
            idf: self.idf(iter.doc_freq()),
            k1: self.k1,
            boost: iter.weight(),
        };
        iter.set_score_params(params);
        self.registrations.push(ScorerRegistration {
            column_id,
            term: iter.term().to_string(),
        });
    }

    /// Registered term iterators, in registration order.
    pub fn registrations(&self) -> &[ScorerRegistration] {
        &self.registrations
    }

    /// Get the b parameter.
    pub fn b(&self) -> f32 {
        self.b
    }

    /// Get the k1 parameter.
    pub fn k1(&self) -> f32 {
        self.k1
    }

    /// IDF = log((N - df + 0.5) / (df + 0.5)), floored at zero.
    fn idf(&self, doc_freq: u64) -> f32 {
        if doc_freq == 0 || self.total_docs == 0 {
            return 0.0;
        }
        let n = self.total_docs as f32;
        let df = doc_freq as f32;
        ((n - df + 0.5) / (df + 0.5)).ln().max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf_monotonicity() {
        let scorer = Scorer::new(100);

        let rare = scorer.idf(1);
        let common = scorer.idf(50);
        assert!(rare > common);
        assert_eq!(scorer.idf(0), 0.0);
    }

    #[test]
    fn test_term_freq_saturation() {
        let params = TermScoreParams {
            idf: 1.0,
            k1: 1.2,
            boost: 1.0,
        };

        assert_eq!(params.score(0), 0.0);
        let one = params.score(1);
        let five = params.score(5);
        let fifty = params.score(50);
        assert!(one > 0.0);
        assert!(five > one);
        // BM25 saturates: tf 50 gains little over tf 5.
        assert!(fifty - five < five - one);
    }

    #[test]
    fn test_boost_scales_score() {
        let base = TermScoreParams {
            idf: 1.5,
            k1: 1.2,
            boost: 1.0,
        };
        let boosted = TermScoreParams {
            idf: 1.5,
            k1: 1.2,
            boost: 2.0,
        };

        assert!((boosted.score(3) - 2.0 * base.score(3)).abs() < 1e-6);
    }
}
