//! End-to-end planning tests: normalize a tree, build the iterator tree over
//! an in-memory index, and walk it.

use sagitta::error::SagittaError;
use sagitta::index::{MemoryColumnIndex, MemoryIndexReader, Posting};
use sagitta::query::{create_search, normalize, QueryNode};
use sagitta::schema::Table;
use sagitta::search::{DocIterator, Scorer};

const TITLE: u32 = 0;
const BODY: u32 = 1;

fn table() -> Table {
    Table::new("articles").with_column("title").with_column("body")
}

/// Ten documents. body:rust on evens, body:cpp on 4 and 8, body:slow on 0
/// and 2, title:intro on 0, 1, 2.
fn reader() -> MemoryIndexReader {
    let mut title = MemoryColumnIndex::new();
    title.add_term("intro", &[0, 1, 2]);

    let mut body = MemoryColumnIndex::new();
    body.add_term("rust", &[0, 2, 4, 6, 8]);
    body.add_term("cpp", &[4, 8]);
    body.add_term("slow", &[0, 2]);
    for doc in 0..10 {
        body.add_posting("the", Posting::new(doc).with_frequency(3));
    }

    MemoryIndexReader::new()
        .with_column(TITLE, title)
        .with_column(BODY, body)
}

fn drain(mut iter: Box<dyn DocIterator>) -> Vec<u64> {
    let mut docs = Vec::new();
    while !iter.is_exhausted() {
        docs.push(iter.doc_id());
        if !iter.next().unwrap() {
            break;
        }
    }
    docs
}

fn plan(input: QueryNode) -> (Option<Box<dyn DocIterator>>, Scorer) {
    let reader = reader();
    let mut scorer = Scorer::new(10);
    let tree = normalize(input).unwrap();
    let iter = create_search(&tree, &table(), &reader, &mut scorer).unwrap();
    (iter, scorer)
}

#[test]
fn term_walk() {
    let (iter, _) = plan(QueryNode::term("body", "rust"));
    assert_eq!(drain(iter.unwrap()), vec![0, 2, 4, 6, 8]);
}

#[test]
fn missing_term_is_absent() {
    let (iter, scorer) = plan(QueryNode::term("body", "golang"));
    assert!(iter.is_none());
    assert!(scorer.registrations().is_empty());
}

#[test]
fn unknown_column_is_absent() {
    let (iter, _) = plan(QueryNode::term("footnotes", "rust"));
    assert!(iter.is_none());
}

#[test]
fn conjunction_intersects() {
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "rust"),
        QueryNode::term("title", "intro"),
    ]));
    assert_eq!(drain(iter.unwrap()), vec![0, 2]);
}

#[test]
fn conjunction_drops_absent_children() {
    // The missing term contributes no iterator; the survivor runs alone.
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "rust"),
        QueryNode::term("body", "golang"),
    ]));
    assert_eq!(drain(iter.unwrap()), vec![0, 2, 4, 6, 8]);
}

#[test]
fn conjunction_of_only_absent_children_is_absent() {
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "golang"),
        QueryNode::term("body", "zig"),
    ]));
    assert!(iter.is_none());
}

#[test]
fn disjunction_unions() {
    let (iter, _) = plan(QueryNode::or(vec![
        QueryNode::term("body", "cpp"),
        QueryNode::term("body", "slow"),
    ]));
    assert_eq!(drain(iter.unwrap()), vec![0, 2, 4, 8]);
}

#[test]
fn disjunction_promotes_single_survivor() {
    let (iter, _) = plan(QueryNode::or(vec![
        QueryNode::term("body", "cpp"),
        QueryNode::term("body", "golang"),
    ]));
    assert_eq!(drain(iter.unwrap()), vec![4, 8]);
}

#[test]
fn difference_subtracts() {
    // body:rust AND NOT body:cpp
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "rust"),
        QueryNode::not(vec![QueryNode::term("body", "cpp")]),
    ]));
    assert_eq!(drain(iter.unwrap()), vec![0, 2, 6]);
}

#[test]
fn difference_with_conjunctive_subtrahend() {
    // rust AND NOT (cpp OR slow), stated as rust AND ((NOT cpp) AND (NOT slow)).
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "rust"),
        QueryNode::and(vec![
            QueryNode::not(vec![QueryNode::term("body", "cpp")]),
            QueryNode::not(vec![QueryNode::term("body", "slow")]),
        ]),
    ]));
    assert_eq!(drain(iter.unwrap()), vec![6]);
}

#[test]
fn difference_absent_positive_side_is_absent() {
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "golang"),
        QueryNode::not(vec![QueryNode::term("body", "cpp")]),
    ]));
    assert!(iter.is_none());
}

#[test]
fn difference_absent_subtrahend_promotes_positive() {
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "rust"),
        QueryNode::not(vec![QueryNode::term("body", "golang")]),
    ]));
    assert_eq!(drain(iter.unwrap()), vec![0, 2, 4, 6, 8]);
}

#[test]
fn not_root_is_rejected_by_factory() {
    let _ = env_logger::builder().is_test(true).try_init();

    let reader = reader();
    let mut scorer = Scorer::new(10);
    let tree = normalize(QueryNode::or(vec![
        QueryNode::not(vec![QueryNode::term("body", "rust")]),
        QueryNode::not(vec![QueryNode::term("body", "cpp")]),
    ]))
    .unwrap();

    let err = create_search(&tree, &table(), &reader, &mut scorer).unwrap_err();
    assert!(matches!(err, SagittaError::InvalidNormalization(_)));
}

#[test]
fn opaque_leaf_is_not_implemented() {
    let reader = reader();
    let mut scorer = Scorer::new(10);
    let tree = normalize(QueryNode::phrase(
        "body",
        vec!["hello".into(), "world".into()],
    ))
    .unwrap();

    let err = create_search(&tree, &table(), &reader, &mut scorer).unwrap_err();
    assert!(matches!(err, SagittaError::NotImplemented(_)));
}

#[test]
fn scorer_registration_order_is_left_to_right() {
    // Normalizes to AND_NOT(AND(title:intro, OR(body:cpp, body:slow)), body:rust).
    let (_, scorer) = plan(QueryNode::and(vec![
        QueryNode::term("title", "intro"),
        QueryNode::or(vec![
            QueryNode::term("body", "cpp"),
            QueryNode::term("body", "slow"),
        ]),
        QueryNode::not(vec![QueryNode::term("body", "rust")]),
    ]));

    let registered: Vec<(u32, &str)> = scorer
        .registrations()
        .iter()
        .map(|r| (r.column_id, r.term.as_str()))
        .collect();
    assert_eq!(
        registered,
        vec![(TITLE, "intro"), (BODY, "cpp"), (BODY, "slow"), (BODY, "rust")]
    );
}

#[test]
fn absent_terms_do_not_register() {
    let (_, scorer) = plan(QueryNode::or(vec![
        QueryNode::term("body", "golang"),
        QueryNode::term("body", "cpp"),
    ]));

    let registered: Vec<&str> = scorer
        .registrations()
        .iter()
        .map(|r| r.term.as_str())
        .collect();
    assert_eq!(registered, vec!["cpp"]);
}

#[test]
fn rare_terms_outscore_common_ones() {
    // Doc 4 matches the rare cpp; doc 6 only the ubiquitous filler term.
    let (iter, _) = plan(QueryNode::or(vec![
        QueryNode::term("body", "cpp"),
        QueryNode::term("body", "the"),
    ]));
    let mut iter = iter.unwrap();

    assert!(iter.advance_to(4).unwrap());
    assert_eq!(iter.doc_id(), 4);
    let both = iter.score();

    assert!(iter.advance_to(6).unwrap());
    assert_eq!(iter.doc_id(), 6);
    let filler_only = iter.score();

    assert!(both > filler_only);
}

#[test]
fn difference_scores_come_from_positive_side() {
    let (iter, _) = plan(QueryNode::and(vec![
        QueryNode::term("body", "cpp"),
        QueryNode::not(vec![QueryNode::term("body", "slow")]),
    ]));
    let mut iter = iter.unwrap();

    // cpp postings all have frequency 1, so surviving docs score alike.
    assert_eq!(iter.doc_id(), 4);
    let first = iter.score();
    assert!(first > 0.0);
    assert!(iter.next().unwrap());
    assert_eq!(iter.doc_id(), 8);
    assert!((iter.score() - first).abs() < 1e-6);
}

#[test]
fn weighted_leaf_scales_score() {
    let (plain, _) = plan(QueryNode::term("body", "cpp"));
    let (boosted, _) = plan(QueryNode::term("body", "cpp").with_weight(3.0));

    let plain = plain.unwrap().score();
    let boosted = boosted.unwrap().score();
    assert!((boosted - 3.0 * plain).abs() < 1e-5);
}

#[test]
fn printed_plan_is_stable() {
    let tree = normalize(QueryNode::and(vec![
        QueryNode::term("body", "rust"),
        QueryNode::not(vec![QueryNode::term("body", "cpp")]),
    ]))
    .unwrap();

    let expected = "\
└──AND_NOT (weight: 1) (children count: 2)
    ├──TERM (weight: 1) (column: body) (term: rust)
    └──TERM (weight: 1) (column: body) (term: cpp)
";
    assert_eq!(tree.to_string(), expected);
}
