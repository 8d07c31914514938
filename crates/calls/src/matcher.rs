//! Query-side arguments: literals and matchers.
//!
//! A query argument either demands equality with the stored argument
//! ([`QueryArg::Literal`]) or runs a test against it ([`QueryArg::Matches`]).
//! Dispatch happens on the query side only; stored arguments are always
//! literal.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::arg::{Arg, IntoArg, join_args};

/// A test over a stored argument.
///
/// Implement this to plug a custom comparison into a query. Closures are
/// usually simpler, see [`predicate`].
pub trait ArgMatcher: Send + Sync {
	/// Returns whether `subject` satisfies this matcher.
	fn matches(&self, subject: &Arg) -> bool;

	/// Writes a short human description used in diagnostics.
	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Shared handle to an [`ArgMatcher`].
#[derive(Clone)]
pub struct Matcher(Arc<dyn ArgMatcher>);

impl Matcher {
	/// Wraps a custom matcher.
	pub fn new(matcher: impl ArgMatcher + 'static) -> Self {
		Self(Arc::new(matcher))
	}

	/// Evaluates the matcher against a stored argument.
	pub fn matches(&self, subject: &Arg) -> bool {
		self.0.matches(subject)
	}

	/// Replaces the description shown in diagnostics.
	pub fn named(self, name: impl Into<String>) -> Self {
		Self::new(Named {
			inner: self,
			name: name.into(),
		})
	}
}

impl fmt::Debug for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.describe(f)
	}
}

impl fmt::Display for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.describe(f)
	}
}

/// One argument position of a query.
#[derive(Clone, Debug)]
pub enum QueryArg {
	/// Matches a stored argument equal to this one.
	Literal(Arg),
	/// Matches a stored argument the matcher accepts.
	Matches(Matcher),
}

impl QueryArg {
	/// Returns whether the stored argument satisfies this query position.
	pub fn matches(&self, stored: &Arg) -> bool {
		match self {
			Self::Literal(expected) => expected == stored,
			Self::Matches(matcher) => matcher.matches(stored),
		}
	}

	/// Returns the literal, if this position is one.
	pub fn as_literal(&self) -> Option<&Arg> {
		match self {
			Self::Literal(arg) => Some(arg),
			Self::Matches(_) => None,
		}
	}
}

impl fmt::Display for QueryArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(arg) => fmt::Display::fmt(arg, f),
			Self::Matches(matcher) => fmt::Display::fmt(matcher, f),
		}
	}
}

impl From<Arg> for QueryArg {
	fn from(arg: Arg) -> Self {
		Self::Literal(arg)
	}
}

impl From<Matcher> for QueryArg {
	fn from(matcher: Matcher) -> Self {
		Self::Matches(matcher)
	}
}

/// Conversion used by the `query!` macro.
///
/// Plain values become literals, normalised like recorded arguments;
/// matchers stay matchers.
pub trait IntoQueryArg {
	fn into_query_arg(self) -> QueryArg;
}

impl<T: IntoArg> IntoQueryArg for T {
	fn into_query_arg(self) -> QueryArg {
		QueryArg::Literal(self.into_arg())
	}
}

impl IntoQueryArg for Matcher {
	fn into_query_arg(self) -> QueryArg {
		QueryArg::Matches(self)
	}
}

impl IntoQueryArg for QueryArg {
	fn into_query_arg(self) -> QueryArg {
		self
	}
}

struct Anything;

impl ArgMatcher for Anything {
	fn matches(&self, _subject: &Arg) -> bool {
		true
	}

	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("<any>")
	}
}

struct Equals(Arg);

impl ArgMatcher for Equals {
	fn matches(&self, subject: &Arg) -> bool {
		&self.0 == subject
	}

	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<eq {}>", self.0)
	}
}

struct Predicate<T, F> {
	test: F,
	_subject: PhantomData<fn(&T) -> bool>,
}

impl<T, F> ArgMatcher for Predicate<T, F>
where
	T: 'static,
	F: Fn(&T) -> bool + Send + Sync,
{
	fn matches(&self, subject: &Arg) -> bool {
		subject.downcast_ref::<T>().is_some_and(|value| (self.test)(value))
	}

	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<predicate on {}>", std::any::type_name::<T>())
	}
}

struct Not(Matcher);

impl ArgMatcher for Not {
	fn matches(&self, subject: &Arg) -> bool {
		!self.0.matches(subject)
	}

	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<not {}>", self.0)
	}
}

struct AllOf(Vec<Matcher>);

impl ArgMatcher for AllOf {
	fn matches(&self, subject: &Arg) -> bool {
		self.0.iter().all(|m| m.matches(subject))
	}

	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<all of [{}]>", join_args(&self.0))
	}
}

struct AnyOf(Vec<Matcher>);

impl ArgMatcher for AnyOf {
	fn matches(&self, subject: &Arg) -> bool {
		self.0.iter().any(|m| m.matches(subject))
	}

	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<any of [{}]>", join_args(&self.0))
	}
}

struct Named {
	inner: Matcher,
	name: String,
}

impl ArgMatcher for Named {
	fn matches(&self, subject: &Arg) -> bool {
		self.inner.matches(subject)
	}

	fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}>", self.name)
	}
}

/// Matches every stored argument.
pub fn any() -> Matcher {
	Matcher::new(Anything)
}

/// Matches a stored argument equal to `value`.
pub fn eq<T: IntoArg>(value: T) -> Matcher {
	Matcher::new(Equals(value.into_arg()))
}

/// Matches a stored `T` for which `test` returns `true`.
///
/// A stored argument of any other type never matches.
pub fn predicate<T, F>(test: F) -> Matcher
where
	T: 'static,
	F: Fn(&T) -> bool + Send + Sync + 'static,
{
	Matcher::new(Predicate {
		test,
		_subject: PhantomData,
	})
}

/// Inverts a matcher.
pub fn not(matcher: Matcher) -> Matcher {
	Matcher::new(Not(matcher))
}

/// Matches when every matcher matches.
pub fn all_of(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
	Matcher::new(AllOf(matchers.into_iter().collect()))
}

/// Matches when at least one matcher matches.
pub fn any_of(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
	Matcher::new(AnyOf(matchers.into_iter().collect()))
}
