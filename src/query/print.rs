//! Diagnostic rendering of query trees.
//!
//! The output is byte-stable for a given tree, which makes it usable as a
//! golden-file oracle in tests and greppable in logs.

use std::fmt;

use crate::query::node::QueryNode;

impl QueryNode {
    /// Render this subtree into `sink`.
    ///
    /// `prefix` is the indentation accumulated from ancestors; `is_last`
    /// selects the branch rune for this node's own line.
    pub fn print_tree(&self, sink: &mut dyn fmt::Write, prefix: &str, is_last: bool) -> fmt::Result {
        sink.write_str(prefix)?;
        sink.write_str(if is_last { "└──" } else { "├──" })?;
        write!(sink, "{} (weight: {})", self.kind(), self.weight())?;
        match self {
            QueryNode::Term(n)
            | QueryNode::PrefixTerm(n)
            | QueryNode::SuffixTerm(n)
            | QueryNode::SubstringTerm(n) => {
                write!(sink, " (column: {}) (term: {})", n.column, n.term)?;
            }
            QueryNode::Phrase(n) | QueryNode::Wand(n) => {
                write!(sink, " (column: {}) (terms: {})", n.column, n.terms.join(" "))?;
            }
            QueryNode::And(n) | QueryNode::Or(n) | QueryNode::Not(n) | QueryNode::AndNot(n) => {
                write!(sink, " (children count: {})", n.children.len())?;
            }
        }
        sink.write_char('\n')?;

        let children = self.children();
        if let Some((last, rest)) = children.split_last() {
            let next_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            for child in rest {
                child.print_tree(sink, &next_prefix, false)?;
            }
            last.print_tree(sink, &next_prefix, true)?;
        }
        Ok(())
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print_tree(f, "", true)
    }
}
