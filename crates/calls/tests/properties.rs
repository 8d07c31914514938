//! Property tests for counting and ordered verification.

use proptest::prelude::*;
use tattle_calls::{DefaultCalls, Invoked, StrictCalls, VerifyNoMore, args, query};

const IDS: [&str; 3] = ["a", "b", "c"];

fn arb_registrations() -> impl Strategy<Value = Vec<(usize, i32)>> {
	prop::collection::vec((0..IDS.len(), 0..3_i32), 0..24)
}

proptest! {
	/// `verify_call(n, X)` passes iff exactly `n` occurrences of `X` were registered.
	#[test]
	fn prop_count_matches_registrations(
		registrations in arb_registrations(),
		probe_id in 0..IDS.len(),
		probe_arg in 0..3_i32,
		offset in 0..3_usize,
	) {
		let mut calls = DefaultCalls::new();
		for &(id, arg) in &registrations {
			calls.register_call(IDS[id], args![arg]);
		}
		let actual = registrations
			.iter()
			.filter(|&&(id, arg)| id == probe_id && arg == probe_arg)
			.count();

		let exact = calls
			.verify_call(Invoked::times(actual), IDS[probe_id], query![probe_arg])
			.expect("literal queries are never ambiguous");
		prop_assert!(exact.is_passed());

		let wrong = calls
			.verify_call(Invoked::times(actual + 1 + offset), IDS[probe_id], query![probe_arg])
			.expect("literal queries are never ambiguous");
		prop_assert!(wrong.is_failed());
	}

	/// Removing every verified bucket leaves nothing behind.
	#[test]
	fn prop_verify_and_remove_drains_registry(registrations in arb_registrations()) {
		let mut calls = DefaultCalls::new();
		for &(id, arg) in &registrations {
			calls.register_call(IDS[id], args![arg]);
		}
		for id in 0..IDS.len() {
			for arg in 0..3_i32 {
				let times = registrations.iter().filter(|&&r| r == (id, arg)).count();
				let verdict = calls
					.verify_and_remove_call(Invoked::times(times), IDS[id], query![arg])
					.expect("literal queries are never ambiguous");
				prop_assert!(verdict.is_passed());
				let after = calls
					.verify_call(Invoked::NEVER, IDS[id], query![arg])
					.expect("literal queries are never ambiguous");
				prop_assert!(after.is_passed());
			}
		}
		prop_assert!(calls.verify_no_more_invocations_with(false).is_passed());
	}

	/// Replaying the registration order strictly always passes and empties the registry.
	#[test]
	fn prop_strict_replay_in_order(registrations in arb_registrations()) {
		let mut calls = StrictCalls::new();
		for &(id, arg) in &registrations {
			calls.register_call(IDS[id], args![arg]);
		}
		for &(id, arg) in &registrations {
			let verdict = calls
				.verify_strictly_and_remove_call(IDS[id], query![arg])
				.expect("literal queries are never ambiguous");
			prop_assert!(verdict.is_passed());
		}
		prop_assert!(calls.is_empty());
		prop_assert_eq!(calls.cursor(), registrations.len() as u64);
	}

	/// Verifying a call that is not due next fails and leaves the cursor alone.
	#[test]
	fn prop_strict_rejects_calls_not_due(registrations in arb_registrations()) {
		prop_assume!(registrations.len() >= 2);
		prop_assume!(registrations[0] != registrations[1]);

		let mut calls = StrictCalls::new();
		for &(id, arg) in &registrations {
			calls.register_call(IDS[id], args![arg]);
		}
		let (id, arg) = registrations[1];
		let verdict = calls
			.verify_strictly_and_remove_call(IDS[id], query![arg])
			.expect("literal queries are never ambiguous");
		prop_assert!(verdict.is_failed());
		prop_assert_eq!(calls.cursor(), 0);
	}
}
