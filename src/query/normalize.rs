//! Bottom-up normalization of boolean query trees.
//!
//! Parser output may nest `AND`/`OR`/`NOT` arbitrarily. Normalization rewrites
//! such a tree, leaf to root, into a canonical form the iterator factory can
//! execute, or rejects it. The canonical form guarantees:
//!
//! 1. children of `NOT` are only terms, `AND` or `AND_NOT` (a nested `NOT` is
//!    not allowed, an `OR` is flattened into the subtrahend list),
//! 2. children of `AND` are only terms or `OR` (`AND`, `NOT` and `AND_NOT`
//!    children are absorbed),
//! 3. children of `OR` are only terms, `AND` or `AND_NOT`,
//! 4. `AND_NOT` does not exist in parser output; it is generated here. Its
//!    first child is the positive side, the remaining children are
//!    subtrahends.
//!
//! Opaque leaves (phrase, prefix, suffix, substring, weak-AND) are atoms:
//! wherever a term is permitted, so are they.
//!
//! A `NOT` must eventually combine with an enclosing `AND` into an `AND_NOT`.
//! An `OR` mixing positive and negated branches has no efficient posting-list
//! form and is rejected:
//!
//! ```text
//! A and (not B)               =>  A and_not B
//! A and ((not B) and (not C)) =>  A and_not (B, C)
//! A and ((not B) or (not C))  =>  A and_not (B and C)
//! A or (not B)                =>  rejected
//! A and ((not B) or C)        =>  rejected
//! ```

use log::{log_enabled, trace, warn, Level};

use crate::error::{Result, SagittaError};
use crate::query::node::{MultiNode, QueryNode, QueryNodeKind};

/// Normalize a parser-produced query tree into canonical executable form.
///
/// Consumes the input tree; nodes are moved into the output where the rules
/// keep them and fabricated nodes carry weight 1.0. All errors are fatal for
/// the query, no partial tree is returned.
pub fn normalize(root: QueryNode) -> Result<QueryNode> {
    let normalized = optimize(root)?;
    if log_enabled!(Level::Trace) {
        trace!("normalized query tree:\n{normalized}");
    }
    if normalized.kind() == QueryNodeKind::Not {
        // Executable roots need a positive branch; the factory will reject
        // this tree unless the caller supplies one.
        warn!("normalization produced a bare NOT root");
    }
    Ok(normalized)
}

fn optimize(node: QueryNode) -> Result<QueryNode> {
    match node {
        leaf @ (QueryNode::Term(_)
        | QueryNode::Phrase(_)
        | QueryNode::PrefixTerm(_)
        | QueryNode::SuffixTerm(_)
        | QueryNode::SubstringTerm(_)
        | QueryNode::Wand(_)) => Ok(leaf),
        QueryNode::Not(node) => rewrite_not(node),
        QueryNode::And(node) => rewrite_and(node),
        QueryNode::Or(node) => rewrite_or(node),
        QueryNode::AndNot(_) => Err(SagittaError::malformed_tree(
            "AND_NOT node must not appear in parser output",
        )),
    }
}

/// Rewrite a `NOT` node.
///
/// Each normalized child lands in the new subtrahend list: terms, `AND` and
/// `AND_NOT` verbatim, an `OR` child is spliced (by De Morgan the enclosing
/// conjunction subtracts each branch separately). A `NOT` child is invalid.
fn rewrite_not(node: MultiNode) -> Result<QueryNode> {
    if node.children.is_empty() {
        return Err(SagittaError::malformed_tree(
            "NOT node requires at least 1 child",
        ));
    }

    let mut not_list = Vec::with_capacity(node.children.len());
    for child in node.children {
        let child = optimize(child)?;
        match child {
            QueryNode::Term(_)
            | QueryNode::Phrase(_)
            | QueryNode::PrefixTerm(_)
            | QueryNode::SuffixTerm(_)
            | QueryNode::SubstringTerm(_)
            | QueryNode::Wand(_)
            | QueryNode::And(_)
            | QueryNode::AndNot(_) => not_list.push(child),
            QueryNode::Or(or_node) => not_list.extend(or_node.children),
            QueryNode::Not(_) => {
                return Err(SagittaError::unexpected_kind(
                    QueryNodeKind::Not,
                    QueryNodeKind::Not,
                ))
            }
        }
    }

    Ok(QueryNode::Not(MultiNode {
        weight: 1.0,
        children: not_list,
    }))
}

/// Rewrite an `AND` node.
///
/// Children are partitioned into a positive list and a subtrahend list:
/// an `AND` child is flattened, terms and `OR` children move verbatim, a
/// `NOT` child donates its children as subtrahends, and an `AND_NOT` child
/// donates its positive side (flattened if it is an `AND`) plus its
/// subtrahends. The result is, depending on which lists are non-empty, a
/// plain `AND`, an `AND_NOT`, or a `NOT` to be absorbed by an enclosing
/// conjunction.
fn rewrite_and(node: MultiNode) -> Result<QueryNode> {
    if node.children.len() < 2 {
        return Err(SagittaError::malformed_tree(
            "AND node requires at least 2 children",
        ));
    }

    let mut and_list: Vec<QueryNode> = Vec::with_capacity(node.children.len());
    let mut not_list: Vec<QueryNode> = Vec::new();
    for child in node.children {
        let child = optimize(child)?;
        match child {
            QueryNode::And(and_node) => and_list.extend(and_node.children),
            QueryNode::Term(_)
            | QueryNode::Phrase(_)
            | QueryNode::PrefixTerm(_)
            | QueryNode::SuffixTerm(_)
            | QueryNode::SubstringTerm(_)
            | QueryNode::Wand(_)
            | QueryNode::Or(_) => and_list.push(child),
            QueryNode::Not(not_node) => not_list.extend(not_node.children),
            QueryNode::AndNot(and_not_node) => {
                let mut grandchildren = and_not_node.children.into_iter();
                match grandchildren.next() {
                    Some(QueryNode::And(first_and)) => and_list.extend(first_and.children),
                    Some(first) => and_list.push(first),
                    None => {
                        return Err(SagittaError::invalid_normalization(
                            "normalized AND_NOT node has no children",
                        ))
                    }
                }
                not_list.extend(grandchildren);
            }
        }
    }

    if and_list.is_empty() {
        // Only negated children; hand the subtrahends up as a NOT for an
        // enclosing conjunction to absorb.
        return Ok(QueryNode::Not(MultiNode {
            weight: 1.0,
            children: not_list,
        }));
    }
    if not_list.is_empty() {
        if and_list.len() == 1 {
            return Ok(and_list.remove(0));
        }
        return Ok(QueryNode::And(MultiNode {
            weight: 1.0,
            children: and_list,
        }));
    }

    let positive = if and_list.len() == 1 {
        and_list.remove(0)
    } else {
        QueryNode::And(MultiNode {
            weight: 1.0,
            children: and_list,
        })
    };
    let mut children = Vec::with_capacity(1 + not_list.len());
    children.push(positive);
    children.extend(not_list);
    Ok(QueryNode::AndNot(MultiNode {
        weight: 1.0,
        children,
    }))
}

/// Rewrite an `OR` node.
///
/// An `OR` child is flattened; terms, `AND` and `AND_NOT` children move
/// verbatim; `NOT` children are collected separately. Mixing positive and
/// negated branches is rejected. An all-negative disjunction becomes, by De
/// Morgan, a `NOT` over the conjunction of the collapsed subtrahends.
fn rewrite_or(node: MultiNode) -> Result<QueryNode> {
    if node.children.len() < 2 {
        return Err(SagittaError::malformed_tree(
            "OR node requires at least 2 children",
        ));
    }

    let mut or_list: Vec<QueryNode> = Vec::with_capacity(node.children.len());
    let mut not_list: Vec<MultiNode> = Vec::new();
    for child in node.children {
        let child = optimize(child)?;
        match child {
            QueryNode::Or(or_node) => or_list.extend(or_node.children),
            QueryNode::Term(_)
            | QueryNode::Phrase(_)
            | QueryNode::PrefixTerm(_)
            | QueryNode::SuffixTerm(_)
            | QueryNode::SubstringTerm(_)
            | QueryNode::Wand(_)
            | QueryNode::And(_)
            | QueryNode::AndNot(_) => or_list.push(child),
            QueryNode::Not(not_node) => not_list.push(not_node),
        }
    }

    if !or_list.is_empty() && !not_list.is_empty() {
        return Err(SagittaError::unsupported_disjunction(
            "OR node must not mix positive and negated children",
        ));
    }
    if not_list.is_empty() {
        return Ok(QueryNode::Or(MultiNode {
            weight: 1.0,
            children: or_list,
        }));
    }

    // All children were NOT: not a or not b == not (a and b). Each NOT child
    // with several subtrahends collapses to the OR of them.
    let and_children = not_list
        .into_iter()
        .map(|mut not_node| {
            if not_node.children.len() == 1 {
                not_node.children.remove(0)
            } else {
                QueryNode::Or(MultiNode {
                    weight: 1.0,
                    children: not_node.children,
                })
            }
        })
        .collect();
    Ok(QueryNode::Not(MultiNode {
        weight: 1.0,
        children: vec![QueryNode::And(MultiNode {
            weight: 1.0,
            children: and_children,
        })],
    }))
}
