//! Query resolution.
//!
//! A query resolves to the single bucket whose call has the same identifier,
//! the same arity, and an argument accepted by every query position. A query
//! that several buckets satisfy under-specifies the call it means and is
//! rejected rather than resolved to an arbitrary one.

use super::{CallId, CallStore};
use crate::call::CallQuery;
use crate::error::CallsError;

impl<I: CallId> CallStore<I> {
	/// Resolves `query` to a bucket index.
	///
	/// Returns `Ok(None)` when no registered call matches.
	pub(crate) fn resolve(&self, query: &CallQuery<I>) -> Result<Option<usize>, CallsError> {
		let mut matching = self
			.buckets
			.keys()
			.enumerate()
			.filter(|(_, stored)| stored.id() == query.id() && stored.arity() == query.arity())
			.filter(|(_, stored)| query.matches(stored))
			.map(|(index, _)| index);

		let Some(first) = matching.next() else {
			return Ok(None);
		};
		let rest: Vec<usize> = matching.collect();
		if rest.is_empty() {
			return Ok(Some(first));
		}

		let candidates = std::iter::once(first)
			.chain(rest)
			.filter_map(|index| self.buckets.get_index(index))
			.map(|(call, _)| call.to_string())
			.collect();
		Err(CallsError::AmbiguousMatch {
			query: query.to_string(),
			candidates,
		})
	}
}
