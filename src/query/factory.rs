//! Mapping from normalized query trees to document iterators.

use crate::error::{Result, SagittaError};
use crate::index::reader::IndexReader;
use crate::query::node::{QueryNode, TermNode};
use crate::schema::Table;
use crate::search::and::AndIterator;
use crate::search::and_not::AndNotIterator;
use crate::search::doc_iterator::DocIterator;
use crate::search::or::OrIterator;
use crate::search::scorer::Scorer;
use crate::search::term::TermDocIterator;

/// Build the document-iterator tree for a normalized query node.
///
/// `Ok(None)` means the subtree matches no documents: a term that resolves to
/// nothing is dropped, an `AND`/`OR` whose children are all absent is absent,
/// and an `AND_NOT` with an absent positive side is absent. Term iterators
/// are registered with the scorer in the left-to-right order they appear in
/// the tree.
///
/// A `NOT` node here means the caller skipped normalization or ran a tree
/// normalization refused to make executable; both are programming errors.
pub fn create_search(
    node: &QueryNode,
    table: &Table,
    index_reader: &dyn IndexReader,
    scorer: &mut Scorer,
) -> Result<Option<Box<dyn DocIterator>>> {
    match node {
        QueryNode::Term(term) => create_term_search(term, table, index_reader, scorer),
        QueryNode::And(and_node) => {
            let mut sub_iters = Vec::with_capacity(and_node.children.len());
            for child in &and_node.children {
                if let Some(iter) = create_search(child, table, index_reader, scorer)? {
                    sub_iters.push(iter);
                }
            }
            match sub_iters.len() {
                0 => Ok(None),
                1 => Ok(sub_iters.pop()),
                _ => Ok(Some(Box::new(AndIterator::new(sub_iters)?))),
            }
        }
        QueryNode::Or(or_node) => {
            let mut sub_iters = Vec::with_capacity(or_node.children.len());
            for child in &or_node.children {
                if let Some(iter) = create_search(child, table, index_reader, scorer)? {
                    sub_iters.push(iter);
                }
            }
            match sub_iters.len() {
                0 => Ok(None),
                1 => Ok(sub_iters.pop()),
                _ => Ok(Some(Box::new(OrIterator::new(sub_iters)))),
            }
        }
        QueryNode::AndNot(and_not_node) => {
            let mut children = and_not_node.children.iter();
            let positive_node = children.next().ok_or_else(|| {
                SagittaError::invalid_normalization("AND_NOT node has no children")
            })?;
            // Nothing to subtract from if the positive side is absent.
            let Some(positive) = create_search(positive_node, table, index_reader, scorer)? else {
                return Ok(None);
            };
            let mut subtrahends = Vec::new();
            for child in children {
                if let Some(iter) = create_search(child, table, index_reader, scorer)? {
                    subtrahends.push(iter);
                }
            }
            if subtrahends.is_empty() {
                Ok(Some(positive))
            } else {
                Ok(Some(Box::new(AndNotIterator::new(positive, subtrahends)?)))
            }
        }
        QueryNode::Not(_) => Err(SagittaError::invalid_normalization(
            "NOT node reached the iterator factory; negation-only queries need an \
             explicit positive branch",
        )),
        QueryNode::Phrase(_)
        | QueryNode::PrefixTerm(_)
        | QueryNode::SuffixTerm(_)
        | QueryNode::SubstringTerm(_)
        | QueryNode::Wand(_) => Err(SagittaError::not_implemented(format!(
            "{} evaluation",
            node.kind()
        ))),
    }
}

fn create_term_search(
    term: &TermNode,
    table: &Table,
    index_reader: &dyn IndexReader,
    scorer: &mut Scorer,
) -> Result<Option<Box<dyn DocIterator>>> {
    let Some(column_id) = table.column_id_by_name(&term.column) else {
        return Ok(None);
    };
    let Some(column_reader) = index_reader.column_index_reader(column_id) else {
        return Ok(None);
    };
    let Some(posting) = column_reader.lookup(&term.term) else {
        return Ok(None);
    };

    let mut iter = TermDocIterator::new(posting, column_id, term.term.clone(), term.weight)?;
    scorer.add_doc_iterator(&mut iter, column_id);
    Ok(Some(Box::new(iter)))
}
