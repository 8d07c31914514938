use super::CallStore;
use crate::call::{Call, CallQuery};
use crate::context::RegistryOptions;
use crate::error::CallsError;
use crate::matcher::{any, predicate};
use crate::{args, query};

fn store() -> CallStore<&'static str> {
	CallStore::new(RegistryOptions::default())
}

#[test]
fn test_sequence_numbers_span_identifiers() {
	let mut store = store();
	assert_eq!(store.register(Call::new("a", args![1])), 0);
	assert_eq!(store.register(Call::new("b", args![])), 1);
	assert_eq!(store.register(Call::new("a", args![1])), 2);
	assert_eq!(store.next_sequence(), 3);
	assert_eq!(store.len(), 2);

	let (call, occurrences) = store.bucket(0).expect("first bucket");
	assert_eq!(call.id(), &"a");
	let sequences: Vec<u64> = occurrences.iter().map(|o| o.sequence()).collect();
	assert_eq!(sequences, [0, 2]);
}

#[test]
fn test_occurrence_records_call_site() {
	let mut store = store();
	store.register(Call::new("a", args![]));
	let (_, occurrences) = store.bucket(0).expect("bucket");
	assert_eq!(occurrences[0].context().location().file(), file!());
}

#[test]
fn test_resolve_filters_identifier_and_arity() {
	let mut store = store();
	store.register(Call::new("a", args![1]));
	store.register(Call::new("a", args![1, 2]));
	store.register(Call::new("b", args![1]));

	let found = store.resolve(&CallQuery::new("a", query![1, 2])).expect("no ambiguity");
	assert_eq!(found, Some(1));
	let found = store.resolve(&CallQuery::new("b", query![any()])).expect("no ambiguity");
	assert_eq!(found, Some(2));
	let missing = store.resolve(&CallQuery::new("c", query![1])).expect("no ambiguity");
	assert_eq!(missing, None);
	let wrong_arity = store.resolve(&CallQuery::new("a", query![1, 2, 3])).expect("no ambiguity");
	assert_eq!(wrong_arity, None);
}

#[test]
fn test_resolve_rejects_ambiguous_matchers() {
	let mut store = store();
	store.register(Call::new("f", args!["obj1"]));
	store.register(Call::new("f", args!["obj2"]));

	let err = store
		.resolve(&CallQuery::new("f", query![any()]))
		.expect_err("both buckets match");
	match err {
		CallsError::AmbiguousMatch { candidates, .. } => assert_eq!(candidates.len(), 2),
		other => panic!("unexpected error: {other}"),
	}

	let narrowed = store
		.resolve(&CallQuery::new("f", query![predicate(|s: &String| s.ends_with('2'))]))
		.expect("single match");
	assert_eq!(narrowed, Some(1));
}

#[test]
fn test_remove_occurrence_drops_empty_bucket() {
	let mut store = store();
	store.register(Call::new("a", args![]));
	store.register(Call::new("a", args![]));
	store.register(Call::new("b", args![]));

	let removed = store.remove_occurrence(0, 0).expect("occurrence");
	assert_eq!(removed.sequence(), 0);
	assert_eq!(store.len(), 2);
	store.remove_occurrence(0, 0).expect("occurrence");
	assert_eq!(store.len(), 1);
	assert!(store.remove_occurrence(0, 5).is_none());
	assert_eq!(store.bucket(0).map(|(call, _)| *call.id()), Some("b"));
}

#[test]
fn test_reset_clears_buckets_and_counter() {
	let mut store = store();
	store.register(Call::new("a", args![]));
	store.register(Call::new("a", args![]));
	store.reset();
	assert!(store.is_empty());
	assert_eq!(store.next_sequence(), 0);
	assert_eq!(store.register(Call::new("a", args![])), 0);
}

#[test]
fn test_report_filters_and_counts() {
	let mut store = store();
	store.register(Call::new("a", args![1]));
	store.register(Call::new("b", args![]));
	store.register(Call::new("a", args![2]));
	store.register(Call::new("a", args![1]));

	let report = store.report("summary", false, |call| call.id() == &"a");
	let rendered: Vec<(String, String, usize)> = report
		.entries()
		.iter()
		.map(|entry| (entry.call().to_owned(), entry.args().to_owned(), entry.times()))
		.collect();
	assert_eq!(
		rendered,
		[
			(r#""a""#.to_owned(), "1".to_owned(), 2),
			(r#""a""#.to_owned(), "2".to_owned(), 1),
		]
	);
	assert!(report.entries().iter().all(|entry| entry.occurrences().is_none()));

	let with_context = store.report("summary", true, |_| true);
	let first = with_context.entries()[0].occurrences().expect("context printed");
	let sequences: Vec<u64> = first.iter().map(|line| line.sequence()).collect();
	assert_eq!(sequences, [0, 3]);
	assert!(first[0].context()[0].starts_with("at "));
}

#[test]
fn test_count_resolves_query() {
	let mut store = store();
	store.register(Call::new("a", args![vec![1, 2, 3]]));
	store.register(Call::new("a", args![vec![1, 2, 3]]));
	assert_eq!(store.count(&CallQuery::new("a", query![vec![1, 2, 3]])).ok(), Some(2));
	assert_eq!(store.count(&CallQuery::new("a", query![vec![1, 2, 4]])).ok(), Some(0));
}
