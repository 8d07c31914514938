use super::{Verdict, VerifyNoMore, no_more_invocations};
use crate::arg::Arg;
use crate::call::{Call, CallQuery};
use crate::context::RegistryOptions;
use crate::error::CallsError;
use crate::matcher::QueryArg;
use crate::report::ordinal;
use crate::store::{CallId, CallStore, Occurrence};

/// Registry with strictly ordered verification.
///
/// Verifications must replay the global invocation order across every
/// identifier sharing the registry: each successful verification consumes
/// exactly the occurrence whose sequence number equals the cursor, then
/// advances the cursor by one.
pub struct StrictCalls<I> {
	store: CallStore<I>,
	cursor: u64,
}

impl<I: CallId> Default for StrictCalls<I> {
	fn default() -> Self {
		Self::new()
	}
}

impl<I: CallId> StrictCalls<I> {
	pub fn new() -> Self {
		Self::with_options(RegistryOptions::default())
	}

	pub fn with_options(options: RegistryOptions) -> Self {
		Self {
			store: CallStore::new(options),
			cursor: 0,
		}
	}

	pub fn options(&self) -> RegistryOptions {
		self.store.options()
	}

	/// Records one invocation of `id` with `args`.
	#[track_caller]
	pub fn register_call(&mut self, id: I, args: Vec<Arg>) {
		self.store.register(Call::new(id, args));
	}

	/// Records one invocation of a pre-built call.
	#[track_caller]
	pub fn register(&mut self, call: Call<I>) {
		self.store.register(call);
	}

	/// Verifies that `id(args..)` is the next invocation in registration order
	/// and removes that single occurrence.
	///
	/// On failure the cursor does not move.
	pub fn verify_strictly_and_remove_call(&mut self, id: I, args: Vec<QueryArg>) -> Result<Verdict, CallsError> {
		self.verify_strictly_and_remove(&CallQuery::new(id, args))
	}

	pub fn verify_strictly_and_remove(&mut self, query: &CallQuery<I>) -> Result<Verdict, CallsError> {
		let resolved = self
			.store
			.resolve(query)?
			.and_then(|index| Some((index, self.store.bucket(index)?)));
		let Some((index, (call, occurrences))) = resolved else {
			let summary = format!(
				"No registered call matches {query}, expected as the {} invocation.",
				ordinal(self.cursor + 1)
			);
			return Ok(self.fail(summary, query.id()));
		};

		let mut due = occurrences
			.iter()
			.enumerate()
			.filter(|(_, occurrence)| occurrence.sequence() == self.cursor)
			.map(|(position, _)| position);
		let first = due.next();
		let extra = due.count();

		match (first, extra) {
			(None, _) => {
				let summary = format!(
					"Call {call} was not the {} invocation on this mock.",
					ordinal(self.cursor + 1)
				);
				Ok(self.fail(summary, query.id()))
			}
			(Some(position), 0) => {
				tracing::debug!(call = %call, sequence = self.cursor, "verified call in order");
				self.store.remove_occurrence(index, position);
				self.cursor += 1;
				Ok(Verdict::Passed)
			}
			(Some(_), extra) => {
				let err = CallsError::DuplicateSequence {
					call: call.to_string(),
					sequence: self.cursor,
					count: extra + 1,
				};
				let report = self.store.report_for_id(err.to_string(), query.id());
				tracing::error!("{report}");
				Err(err)
			}
		}
	}

	fn fail(&self, summary: String, id: &I) -> Verdict {
		let report = self.store.report_for_id(summary, id);
		tracing::error!("{report}");
		Verdict::Failed(report)
	}

	/// Sequence number of the occurrence due for the next verification.
	pub fn cursor(&self) -> u64 {
		self.cursor
	}

	/// Number of registered occurrences the query resolves to.
	pub fn occurrences(&self, query: &CallQuery<I>) -> Result<usize, CallsError> {
		self.store.count(query)
	}

	/// Registered calls with their remaining occurrences, in order of first
	/// registration.
	pub fn entries(&self) -> impl Iterator<Item = (&Call<I>, &[Occurrence])> {
		self.store.iter()
	}

	/// Number of distinct registered calls.
	pub fn len(&self) -> usize {
		self.store.len()
	}

	pub fn is_empty(&self) -> bool {
		self.store.is_empty()
	}

	/// Sequence number the next registration receives.
	pub fn next_sequence(&self) -> u64 {
		self.store.next_sequence()
	}

	/// Clears every occurrence and restarts both the sequence counter and the
	/// cursor.
	pub fn reset(&mut self) {
		self.store.reset();
		self.cursor = 0;
	}

	#[cfg(test)]
	pub(crate) fn store_mut(&mut self) -> &mut CallStore<I> {
		&mut self.store
	}
}

impl<I: CallId> VerifyNoMore for StrictCalls<I> {
	fn verify_no_more_invocations_with(&self, print_context: bool) -> Verdict {
		no_more_invocations(&self.store, print_context)
	}
}
