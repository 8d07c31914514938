use crate::matcher::{any, predicate};
use crate::{Arg, CallQuery, CallsError, DefaultCalls, Invoked, RegistryOptions, Verdict, VerifyNoMore, args, query};

fn calls() -> DefaultCalls<&'static str> {
	DefaultCalls::new()
}

#[test]
fn test_zero_times_on_empty_registry() {
	let calls = calls();
	let verdict = calls.verify_call(Invoked::NEVER, "anything", query![1]).expect("no ambiguity");
	assert!(verdict.is_passed());
}

#[test]
fn test_counts_must_match_exactly() {
	let mut calls = calls();
	calls.register_call("save", args!["doc"]);
	calls.register_call("save", args!["doc"]);

	assert!(calls.verify_call(Invoked::TWICE, "save", query!["doc"]).unwrap().is_passed());
	assert!(calls.verify_call(Invoked::ONCE, "save", query!["doc"]).unwrap().is_failed());
	assert!(calls.verify_call(Invoked::THRICE, "save", query!["doc"]).unwrap().is_failed());
	assert!(calls.verify_call(Invoked::NEVER, "save", query!["other"]).unwrap().is_passed());
	// Counting does not consume anything.
	assert_eq!(calls.len(), 1);
}

#[test]
fn test_verify_and_remove_empties_bucket() {
	let mut calls = calls();
	calls.register_call("save", args!["doc"]);
	calls.register_call("load", args![]);
	calls.register_call("save", args!["doc"]);

	let verdict = calls.verify_and_remove_call(Invoked::TWICE, "save", query!["doc"]).unwrap();
	assert!(verdict.is_passed());
	assert!(calls.verify_call(Invoked::NEVER, "save", query!["doc"]).unwrap().is_passed());
	assert_eq!(calls.len(), 1);

	assert!(calls.verify_and_remove_call(Invoked::ONCE, "load", query![]).unwrap().is_passed());
	assert!(calls.verify_no_more_invocations().is_passed());
}

#[test]
fn test_failed_verify_and_remove_keeps_bucket() {
	let mut calls = calls();
	calls.register_call("save", args!["doc"]);
	let verdict = calls.verify_and_remove_call(Invoked::TWICE, "save", query!["doc"]).unwrap();
	assert!(verdict.is_failed());
	assert_eq!(calls.len(), 1);
}

#[test]
fn test_structural_equality_of_sequences() {
	let mut calls = calls();
	calls.register_call("f", args![Arg::seq([1, 2, 3])]);

	let miss = calls
		.verify_and_remove_call(Invoked::ONCE, "f", query![Arg::seq([1, 2, 4])])
		.unwrap();
	assert!(miss.is_failed());
	let hit = calls
		.verify_and_remove_call(Invoked::ONCE, "f", query![Arg::seq(vec![1, 2, 3])])
		.unwrap();
	assert!(hit.is_passed());
}

#[test]
fn test_sequences_match_across_containers() {
	let mut calls = calls();
	calls.register_call("f", args![vec![1, 2, 3]]);
	calls.register_call("g", args![[1, 2, 3]]);
	calls.register_call("h", args![["a", "b"]]);

	assert!(calls.verify_call(Invoked::ONCE, "f", query![[1, 2, 3]]).unwrap().is_passed());
	assert!(calls.verify_call(Invoked::ONCE, "g", query![vec![1, 2, 3]]).unwrap().is_passed());
	assert!(calls.verify_call(Invoked::NEVER, "f", query![[1, 2, 4]]).unwrap().is_passed());
	let owned = vec!["a".to_owned(), "b".to_owned()];
	assert!(calls.verify_and_remove_call(Invoked::ONCE, "h", query![owned]).unwrap().is_passed());
}

#[test]
fn test_failure_report_shows_argument_types() {
	let mut calls = DefaultCalls::with_options(RegistryOptions::default().with_print_context(false));
	calls.register_call("resize", args![10_usize]);

	let verdict = calls.verify_call(Invoked::ONCE, "resize", query![10]).unwrap();
	let report = verdict.report().expect("i32 literal does not match a usize");
	assert_eq!(report.entries()[0].arg_types(), ["usize"]);
	assert!(report.to_string().contains("Args: [10], Arg types: [usize], Times invoked: 1."));
}

#[test]
fn test_matchers_resolve_single_bucket() {
	let mut calls = calls();
	calls.register_call("send", args!["alice", 10]);
	calls.register_call("send", args!["bob", 20]);

	let verdict = calls
		.verify_and_remove_call(Invoked::ONCE, "send", query![any(), predicate(|n: &i32| *n > 15)])
		.unwrap();
	assert!(verdict.is_passed());
	assert_eq!(calls.occurrences(&CallQuery::new("send", query!["alice", 10])).ok(), Some(1));
}

#[test]
fn test_ambiguous_query_is_an_error() {
	let mut calls = calls();
	calls.register_call("f", args!["obj1"]);
	calls.register_call("f", args!["obj2"]);

	let result = calls.verify_call(Invoked::ONCE, "f", query![any()]);
	assert!(matches!(result, Err(CallsError::AmbiguousMatch { .. })));
	let result = calls.verify_and_remove_call(Invoked::ONCE, "f", query![any()]);
	assert!(matches!(result, Err(CallsError::AmbiguousMatch { .. })));
	assert_eq!(calls.len(), 2);
}

#[test]
fn test_failure_report_lists_same_identifier() {
	let mut calls = DefaultCalls::with_options(RegistryOptions::default().with_print_context(false));
	calls.register_call("save", args!["a"]);
	calls.register_call("save", args!["b"]);
	calls.register_call("load", args![]);

	let verdict = calls.verify_call(Invoked::ONCE, "save", query!["c"]).unwrap();
	let Verdict::Failed(report) = verdict else {
		panic!("expected failure");
	};
	assert_eq!(
		report.summary(),
		r#"Call "save" was invoked with arguments ["c"]: 0 x, while 1 x was expected."#
	);
	let listed: Vec<&str> = report.entries().iter().map(|entry| entry.args()).collect();
	assert_eq!(listed, [r#""a""#, r#""b""#]);
	assert!(report.entries().iter().all(|entry| entry.occurrences().is_none()));
}

#[test]
fn test_failure_summary_without_arguments() {
	let mut calls = calls();
	calls.register_call("tick", args![]);
	let verdict = calls.verify_call(Invoked::times(4), "tick", query![]).unwrap();
	let report = verdict.report().expect("failed");
	assert_eq!(
		report.summary(),
		r#"Call "tick" was invoked without arguments: 1 x, while 4 x was expected."#
	);
	assert!(report.entries()[0].occurrences().is_some());
}

#[test]
fn test_reset_forgets_calls() {
	let mut calls = calls();
	calls.register_call("save", args![]);
	assert!(calls.verify_call(Invoked::ONCE, "save", query![]).unwrap().is_passed());
	calls.reset();
	assert!(calls.verify_call(Invoked::ONCE, "save", query![]).unwrap().is_failed());
	assert_eq!(calls.next_sequence(), 0);
}

#[test]
fn test_verify_no_more_invocations_lists_remaining() {
	let mut calls = calls();
	calls.register_call("save", args![1]);
	let verdict = calls.verify_no_more_invocations_with(false);
	let report = verdict.report().expect("calls remain");
	assert_eq!(report.summary(), "Calls remaining (that were not removed):");
	assert_eq!(report.entries().len(), 1);
	assert_eq!(calls.entries().count(), 1);
}

#[test]
#[should_panic(expected = "verification failed")]
fn test_assert_panics_on_failure() {
	let mut calls = calls();
	calls.register_call("save", args![]);
	calls.verify_no_more_invocations().assert();
}
