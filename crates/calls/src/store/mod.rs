//! Occurrence storage shared by both verification disciplines.
//!
//! # Mental Model
//!
//! A [`CallStore`] maps each distinct [`Call`] (the bucket key) to the ordered
//! list of its [`Occurrence`]s. Every registration appends one occurrence
//! tagged with the next value of a store-wide sequence counter, so sequence
//! numbers order all invocations across all identifiers.
//!
//! Lookups go through [`CallStore::resolve`], which turns a [`CallQuery`]
//! (possibly containing matchers) into at most one bucket.
//!
//! # Invariants
//!
//! - No bucket is ever empty; emptied buckets are removed.
//! - Sequence numbers are unique and strictly increasing until [`CallStore::reset`].
//! - Buckets iterate in order of their first registration, which keeps
//!   diagnostics deterministic.

mod lookup;

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::arg::{Arg, join_args};
use crate::call::{Call, CallQuery};
use crate::context::{CallContext, RegistryOptions};
use crate::report::{OccurrenceLine, Report, ReportEntry};

/// Bound on registry identifiers.
///
/// Blanket-implemented for any hashable, comparable, printable value.
pub trait CallId: Eq + Hash + Clone + fmt::Debug {}

impl<T> CallId for T where T: Eq + Hash + Clone + fmt::Debug {}

/// One registration event of a call.
#[derive(Debug, Clone)]
pub struct Occurrence {
	sequence: u64,
	context: CallContext,
}

impl Occurrence {
	/// Zero-based position in the store's global invocation order.
	pub fn sequence(&self) -> u64 {
		self.sequence
	}

	pub fn context(&self) -> &CallContext {
		&self.context
	}
}

/// Call buckets plus the registration sequence counter.
pub(crate) struct CallStore<I> {
	buckets: IndexMap<Call<I>, Vec<Occurrence>, FxBuildHasher>,
	next_sequence: u64,
	options: RegistryOptions,
}

impl<I: CallId> CallStore<I> {
	pub(crate) fn new(options: RegistryOptions) -> Self {
		Self {
			buckets: IndexMap::default(),
			next_sequence: 0,
			options,
		}
	}

	pub(crate) fn options(&self) -> RegistryOptions {
		self.options
	}

	/// Appends an occurrence of `call`, returning its sequence number.
	#[track_caller]
	pub(crate) fn register(&mut self, call: Call<I>) -> u64 {
		let context = CallContext::capture(self.options.capture);
		let sequence = self.next_sequence;
		self.next_sequence += 1;

		tracing::trace!(
			call = ?call.id(),
			args = %join_args(call.args()),
			sequence,
			location = %context.location(),
			"registered call"
		);

		self.buckets
			.entry(call)
			.or_default()
			.push(Occurrence { sequence, context });
		sequence
	}

	pub(crate) fn bucket(&self, index: usize) -> Option<(&Call<I>, &[Occurrence])> {
		self.buckets
			.get_index(index)
			.map(|(call, occurrences)| (call, occurrences.as_slice()))
	}

	/// Removes a whole bucket.
	pub(crate) fn remove_bucket(&mut self, index: usize) -> Option<(Call<I>, Vec<Occurrence>)> {
		self.buckets.shift_remove_index(index)
	}

	/// Removes one occurrence, dropping the bucket once it is empty.
	pub(crate) fn remove_occurrence(&mut self, index: usize, position: usize) -> Option<Occurrence> {
		let (_, occurrences) = self.buckets.get_index_mut(index)?;
		if position >= occurrences.len() {
			return None;
		}
		let removed = occurrences.remove(position);
		if occurrences.is_empty() {
			self.buckets.shift_remove_index(index);
		}
		Some(removed)
	}

	pub(crate) fn len(&self) -> usize {
		self.buckets.len()
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	pub(crate) fn next_sequence(&self) -> u64 {
		self.next_sequence
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = (&Call<I>, &[Occurrence])> {
		self.buckets
			.iter()
			.map(|(call, occurrences)| (call, occurrences.as_slice()))
	}

	pub(crate) fn reset(&mut self) {
		self.buckets.clear();
		self.next_sequence = 0;
	}

	/// Builds a report over the entries accepted by `filter`.
	pub(crate) fn report(
		&self,
		summary: impl Into<String>,
		print_context: bool,
		filter: impl Fn(&Call<I>) -> bool,
	) -> Report {
		let entries = self
			.buckets
			.iter()
			.filter(|(call, _)| filter(call))
			.map(|(call, occurrences)| render_entry(call, occurrences, print_context))
			.collect();
		Report::new(summary, entries)
	}

	/// Report over every bucket sharing `id`.
	pub(crate) fn report_for_id(&self, summary: impl Into<String>, id: &I) -> Report {
		self.report(summary, self.options.print_context, |call| call.id() == id)
	}

	/// Occurrence count of the bucket a query resolves to, zero if none.
	pub(crate) fn count(&self, query: &CallQuery<I>) -> Result<usize, crate::CallsError> {
		Ok(self
			.resolve(query)?
			.and_then(|index| self.bucket(index))
			.map_or(0, |(_, occurrences)| occurrences.len()))
	}

	#[cfg(test)]
	pub(crate) fn push_raw(&mut self, call: Call<I>, sequence: u64) {
		let context = CallContext::capture(self.options.capture);
		self.buckets
			.entry(call)
			.or_default()
			.push(Occurrence { sequence, context });
	}
}

fn render_entry<I: fmt::Debug>(
	call: &Call<I>,
	occurrences: &[Occurrence],
	print_context: bool,
) -> ReportEntry {
	ReportEntry {
		call: format!("{:?}", call.id()),
		args: join_args::<Arg>(call.args()),
		arg_types: call.args().iter().map(Arg::short_type_name).collect(),
		times: occurrences.len(),
		occurrences: print_context.then(|| {
			occurrences
				.iter()
				.map(|occurrence| OccurrenceLine {
					sequence: occurrence.sequence,
					context: occurrence.context.lines(),
				})
				.collect()
		}),
	}
}

#[cfg(test)]
mod tests;
