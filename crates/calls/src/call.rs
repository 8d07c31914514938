//! Call values, queries, and expected invocation counts.

use std::fmt;

use crate::arg::{Arg, join_args};
use crate::matcher::QueryArg;

/// One potential invocation: which operation, with which arguments.
///
/// This is the storage key of a registry. Two calls are the same key when the
/// identifiers are equal and every argument position is literally equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Call<I> {
	id: I,
	args: Vec<Arg>,
}

impl<I> Call<I> {
	/// Creates a call. An operation without arguments takes an empty vector.
	pub fn new(id: I, args: Vec<Arg>) -> Self {
		Self { id, args }
	}

	pub fn id(&self) -> &I {
		&self.id
	}

	pub fn args(&self) -> &[Arg] {
		&self.args
	}

	pub fn arity(&self) -> usize {
		self.args.len()
	}
}

impl<I: fmt::Debug> fmt::Debug for Call<I> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}({})", self.id, join_args(&self.args))
	}
}

impl<I: fmt::Debug> fmt::Display for Call<I> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

/// A call description used for lookup, where positions may be matchers.
#[derive(Clone)]
pub struct CallQuery<I> {
	id: I,
	args: Vec<QueryArg>,
}

impl<I> CallQuery<I> {
	pub fn new(id: I, args: Vec<QueryArg>) -> Self {
		Self { id, args }
	}

	pub fn id(&self) -> &I {
		&self.id
	}

	pub fn args(&self) -> &[QueryArg] {
		&self.args
	}

	pub fn arity(&self) -> usize {
		self.args.len()
	}
}

impl<I: PartialEq> CallQuery<I> {
	/// Returns whether a stored call satisfies this query: same identifier,
	/// same arity, and every position matching.
	pub fn matches(&self, stored: &Call<I>) -> bool {
		self.id == stored.id
			&& self.args.len() == stored.args.len()
			&& self
				.args
				.iter()
				.zip(&stored.args)
				.all(|(query, arg)| query.matches(arg))
	}
}

impl<I> From<Call<I>> for CallQuery<I> {
	fn from(call: Call<I>) -> Self {
		Self {
			id: call.id,
			args: call.args.into_iter().map(QueryArg::Literal).collect(),
		}
	}
}

impl<I: fmt::Debug> fmt::Debug for CallQuery<I> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}({})", self.id, join_args(&self.args))
	}
}

impl<I: fmt::Debug> fmt::Display for CallQuery<I> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

/// Expected number of invocations for a counting verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Invoked(usize);

impl Invoked {
	pub const NEVER: Self = Self(0);
	pub const ONCE: Self = Self(1);
	pub const TWICE: Self = Self(2);
	pub const THRICE: Self = Self(3);

	pub const fn times(times: usize) -> Self {
		Self(times)
	}

	pub const fn count(self) -> usize {
		self.0
	}
}

impl From<usize> for Invoked {
	fn from(times: usize) -> Self {
		Self(times)
	}
}

impl fmt::Display for Invoked {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} x", self.0)
	}
}
