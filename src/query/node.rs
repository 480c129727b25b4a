//! The query node model.
//!
//! Parser output is a tree of [`QueryNode`]s. The normalizer reshapes that
//! tree into a canonical form; the iterator factory then maps it onto
//! document iterators. `AND_NOT` never appears in parser output, it is
//! introduced by normalization.

use serde::{Deserialize, Serialize};

/// The closed set of query node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryNodeKind {
    /// Sentinel for uninitialized or corrupted nodes.
    Invalid,
    /// Exact term in a column.
    Term,
    /// Conjunction.
    And,
    /// Conjunction with subtrahends, derived during normalization.
    AndNot,
    /// Disjunction.
    Or,
    /// Negation.
    Not,
    /// Weak-AND over a bag of terms.
    Wand,
    /// Consecutive terms in a column.
    Phrase,
    /// Terms sharing a prefix.
    PrefixTerm,
    /// Terms sharing a suffix.
    SuffixTerm,
    /// Terms containing a fragment.
    SubstringTerm,
}

impl QueryNodeKind {
    /// The stable token used in diagnostics and tree rendering.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryNodeKind::Invalid => "INVALID",
            QueryNodeKind::Term => "TERM",
            QueryNodeKind::And => "AND",
            QueryNodeKind::AndNot => "AND_NOT",
            QueryNodeKind::Or => "OR",
            QueryNodeKind::Not => "NOT",
            QueryNodeKind::Wand => "WAND",
            QueryNodeKind::Phrase => "PHRASE",
            QueryNodeKind::PrefixTerm => "PREFIX_TERM",
            QueryNodeKind::SuffixTerm => "SUFFIX_TERM",
            QueryNodeKind::SubstringTerm => "SUBSTRING_TERM",
        }
    }
}

impl std::fmt::Display for QueryNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a term leaf: one term in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermNode {
    /// Query weight of this leaf.
    pub weight: f32,
    /// Column searched.
    pub column: String,
    /// The term, already analyzed.
    pub term: String,
}

/// Payload of leaves carrying an ordered bag of terms in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermListNode {
    /// Query weight of this leaf.
    pub weight: f32,
    /// Column searched.
    pub column: String,
    /// The terms, already analyzed.
    pub terms: Vec<String>,
}

/// Payload of composite nodes: an ordered sequence of owned children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiNode {
    /// Query weight of this composite.
    pub weight: f32,
    /// Owned children, in query order.
    pub children: Vec<QueryNode>,
}

/// A node of the boolean query tree.
///
/// Leaves carry their payload; composites own their children. The five
/// non-term leaf kinds are atoms for the normalizer: it moves them but never
/// destructures them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryNode {
    /// Exact term leaf.
    Term(TermNode),
    /// Phrase leaf.
    Phrase(TermListNode),
    /// Prefix-expansion leaf.
    PrefixTerm(TermNode),
    /// Suffix-expansion leaf.
    SuffixTerm(TermNode),
    /// Substring-expansion leaf.
    SubstringTerm(TermNode),
    /// Weak-AND leaf.
    Wand(TermListNode),
    /// Conjunction.
    And(MultiNode),
    /// Disjunction.
    Or(MultiNode),
    /// Negation.
    Not(MultiNode),
    /// Conjunction with subtrahends; the first child is the positive side.
    AndNot(MultiNode),
}

impl QueryNode {
    /// Create a term leaf with weight 1.0.
    pub fn term<C, T>(column: C, term: T) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        QueryNode::Term(TermNode {
            weight: 1.0,
            column: column.into(),
            term: term.into(),
        })
    }

    /// Create a phrase leaf with weight 1.0.
    pub fn phrase<C>(column: C, terms: Vec<String>) -> Self
    where
        C: Into<String>,
    {
        QueryNode::Phrase(TermListNode {
            weight: 1.0,
            column: column.into(),
            terms,
        })
    }

    /// Create a prefix-term leaf with weight 1.0.
    pub fn prefix_term<C, T>(column: C, prefix: T) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        QueryNode::PrefixTerm(TermNode {
            weight: 1.0,
            column: column.into(),
            term: prefix.into(),
        })
    }

    /// Create a suffix-term leaf with weight 1.0.
    pub fn suffix_term<C, T>(column: C, suffix: T) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        QueryNode::SuffixTerm(TermNode {
            weight: 1.0,
            column: column.into(),
            term: suffix.into(),
        })
    }

    /// Create a substring-term leaf with weight 1.0.
    pub fn substring_term<C, T>(column: C, fragment: T) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        QueryNode::SubstringTerm(TermNode {
            weight: 1.0,
            column: column.into(),
            term: fragment.into(),
        })
    }

    /// Create a weak-AND leaf with weight 1.0.
    pub fn wand<C>(column: C, terms: Vec<String>) -> Self
    where
        C: Into<String>,
    {
        QueryNode::Wand(TermListNode {
            weight: 1.0,
            column: column.into(),
            terms,
        })
    }

    /// Create a conjunction with weight 1.0.
    pub fn and(children: Vec<QueryNode>) -> Self {
        QueryNode::And(MultiNode {
            weight: 1.0,
            children,
        })
    }

    /// Create a disjunction with weight 1.0.
    pub fn or(children: Vec<QueryNode>) -> Self {
        QueryNode::Or(MultiNode {
            weight: 1.0,
            children,
        })
    }

    /// Create a negation with weight 1.0.
    pub fn not(children: Vec<QueryNode>) -> Self {
        QueryNode::Not(MultiNode {
            weight: 1.0,
            children,
        })
    }

    /// Create a conjunction-with-subtrahends with weight 1.0. The first
    /// child is the positive side.
    pub fn and_not(children: Vec<QueryNode>) -> Self {
        QueryNode::AndNot(MultiNode {
            weight: 1.0,
            children,
        })
    }

    /// Set the query weight.
    pub fn with_weight(mut self, weight: f32) -> Self {
        match &mut self {
            QueryNode::Term(n) | QueryNode::PrefixTerm(n) | QueryNode::SuffixTerm(n)
            | QueryNode::SubstringTerm(n) => n.weight = weight,
            QueryNode::Phrase(n) | QueryNode::Wand(n) => n.weight = weight,
            QueryNode::And(n) | QueryNode::Or(n) | QueryNode::Not(n) | QueryNode::AndNot(n) => {
                n.weight = weight
            }
        }
        self
    }

    /// Identify the node variant.
    pub fn kind(&self) -> QueryNodeKind {
        match self {
            QueryNode::Term(_) => QueryNodeKind::Term,
            QueryNode::Phrase(_) => QueryNodeKind::Phrase,
            QueryNode::PrefixTerm(_) => QueryNodeKind::PrefixTerm,
            QueryNode::SuffixTerm(_) => QueryNodeKind::SuffixTerm,
            QueryNode::SubstringTerm(_) => QueryNodeKind::SubstringTerm,
            QueryNode::Wand(_) => QueryNodeKind::Wand,
            QueryNode::And(_) => QueryNodeKind::And,
            QueryNode::Or(_) => QueryNodeKind::Or,
            QueryNode::Not(_) => QueryNodeKind::Not,
            QueryNode::AndNot(_) => QueryNodeKind::AndNot,
        }
    }

    /// Query weight of this node.
    pub fn weight(&self) -> f32 {
        match self {
            QueryNode::Term(n) | QueryNode::PrefixTerm(n) | QueryNode::SuffixTerm(n)
            | QueryNode::SubstringTerm(n) => n.weight,
            QueryNode::Phrase(n) | QueryNode::Wand(n) => n.weight,
            QueryNode::And(n) | QueryNode::Or(n) | QueryNode::Not(n) | QueryNode::AndNot(n) => {
                n.weight
            }
        }
    }

    /// Ordered read access to children; empty for leaves.
    pub fn children(&self) -> &[QueryNode] {
        match self {
            QueryNode::And(n) | QueryNode::Or(n) | QueryNode::Not(n) | QueryNode::AndNot(n) => {
                &n.children
            }
            _ => &[],
        }
    }

    /// Whether this node is a leaf (term or opaque).
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            QueryNode::And(_) | QueryNode::Or(_) | QueryNode::Not(_) | QueryNode::AndNot(_)
        )
    }
}
