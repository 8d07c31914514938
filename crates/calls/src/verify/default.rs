use super::{Verdict, VerifyNoMore, no_more_invocations};
use crate::arg::{Arg, join_args};
use crate::call::{Call, CallQuery, Invoked};
use crate::context::RegistryOptions;
use crate::error::CallsError;
use crate::matcher::QueryArg;
use crate::store::{CallId, CallStore, Occurrence};

/// Registry with unordered, counting verification.
///
/// No order is enforced between occurrences of the same or different calls;
/// a verification only compares the number of registered occurrences with
/// the expected count.
pub struct DefaultCalls<I> {
	store: CallStore<I>,
}

impl<I: CallId> Default for DefaultCalls<I> {
	fn default() -> Self {
		Self::new()
	}
}

impl<I: CallId> DefaultCalls<I> {
	pub fn new() -> Self {
		Self::with_options(RegistryOptions::default())
	}

	pub fn with_options(options: RegistryOptions) -> Self {
		Self {
			store: CallStore::new(options),
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

	/// Verifies that `id(args..)` was invoked exactly `times` times.
	pub fn verify_call(&self, times: Invoked, id: I, args: Vec<QueryArg>) -> Result<Verdict, CallsError> {
		self.verify(times, &CallQuery::new(id, args))
	}

	pub fn verify(&self, times: Invoked, query: &CallQuery<I>) -> Result<Verdict, CallsError> {
		self.check(times, query).map(|(verdict, _)| verdict)
	}

	/// Like [`Self::verify_call`], and removes the whole bucket on success so
	/// that [`VerifyNoMore`] can later confirm every call was accounted for.
	pub fn verify_and_remove_call(
		&mut self,
		times: Invoked,
		id: I,
		args: Vec<QueryArg>,
	) -> Result<Verdict, CallsError> {
		self.verify_and_remove(times, &CallQuery::new(id, args))
	}

	pub fn verify_and_remove(&mut self, times: Invoked, query: &CallQuery<I>) -> Result<Verdict, CallsError> {
		let (verdict, index) = self.check(times, query)?;
		if let (Verdict::Passed, Some(index)) = (&verdict, index) {
			self.store.remove_bucket(index);
		}
		Ok(verdict)
	}

	/// Number of registered occurrences the query resolves to.
	pub fn occurrences(&self, query: &CallQuery<I>) -> Result<usize, CallsError> {
		self.store.count(query)
	}

	/// Registered calls with their occurrences, in order of first registration.
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

	/// Clears every occurrence and restarts the sequence counter.
	pub fn reset(&mut self) {
		self.store.reset();
	}

	fn check(&self, expected: Invoked, query: &CallQuery<I>) -> Result<(Verdict, Option<usize>), CallsError> {
		let index = self.store.resolve(query)?;
		let resolved = index.and_then(|index| self.store.bucket(index));
		let actual = resolved.map_or(0, |(_, occurrences)| occurrences.len());

		if actual == expected.count() {
			tracing::debug!(call = %query, times = actual, "verified call count");
			return Ok((Verdict::Passed, index));
		}

		let described = match resolved {
			Some((call, _)) if call.arity() == 0 => "without arguments:".to_owned(),
			Some((call, _)) => format!("with arguments [{}]:", join_args(call.args())),
			None if query.arity() == 0 => "without arguments:".to_owned(),
			None => format!("with arguments [{}]:", join_args(query.args())),
		};
		let summary = format!(
			"Call {:?} was invoked {described} {}, while {expected} was expected.",
			query.id(),
			Invoked::times(actual),
		);
		tracing::error!("{summary}");

		let report = self.store.report_for_id(summary, query.id());
		tracing::info!("Registered invocations for {:?}:\n{}", query.id(), report.listing());
		Ok((Verdict::Failed(report), index))
	}
}

impl<I: CallId> VerifyNoMore for DefaultCalls<I> {
	fn verify_no_more_invocations_with(&self, print_context: bool) -> Verdict {
		no_more_invocations(&self.store, print_context)
	}
}

#[cfg(test)]
mod tests;
