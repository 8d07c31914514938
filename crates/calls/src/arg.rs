//! Type-erased call arguments.
//!
//! A stored argument is always a literal value. Equality is literal: two
//! arguments are equal when they hold the same concrete type and that type's
//! [`Eq`] says so.
//!
//! Values reach an [`Arg`] through [`IntoArg`], which normalises them first:
//! `&'static str` becomes [`String`], and arrays, slices and vectors become a
//! sequence of normalised elements. Sequence equality is therefore structural
//! (element by element, nested sequences included) regardless of the
//! container on either side. [`Arg::new`] skips that normalisation and stores
//! any [`ArgValue`] as is.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Bound satisfied by every value that can be recorded as a call argument.
///
/// Blanket-implemented; there is nothing to implement by hand.
pub trait ArgValue: Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> ArgValue for T where T: Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Object-safe view of an [`ArgValue`].
trait ErasedArg: fmt::Debug + Send + Sync {
	fn as_any(&self) -> &dyn Any;
	fn eq_erased(&self, other: &dyn ErasedArg) -> bool;
	fn hash_erased(&self, state: &mut dyn Hasher);
	fn type_name(&self) -> &'static str;
}

impl<T: ArgValue> ErasedArg for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_erased(&self, other: &dyn ErasedArg) -> bool {
		other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
	}

	fn hash_erased(&self, mut state: &mut dyn Hasher) {
		TypeId::of::<T>().hash(&mut state);
		self.hash(&mut state);
	}

	fn type_name(&self) -> &'static str {
		type_name::<T>()
	}
}

/// A recorded (or queried) literal argument.
///
/// Cloning is cheap; the value is shared.
#[derive(Clone)]
pub struct Arg(Arc<dyn ErasedArg>);

impl Arg {
	/// Wraps a value.
	///
	/// `&'static str` is stored as [`String`] so that string literals and owned
	/// strings compare equal. Wrapping an [`Arg`] returns it unchanged.
	pub fn new<T: ArgValue>(value: T) -> Self {
		let any: &dyn Any = &value;
		if let Some(arg) = any.downcast_ref::<Arg>() {
			return arg.clone();
		}
		if let Some(text) = any.downcast_ref::<&'static str>() {
			return Self(Arc::new(String::from(*text)));
		}
		Self(Arc::new(value))
	}

	/// Wraps an array-shaped value as a sequence of normalised elements.
	///
	/// Arrays, slices, vectors and iterators produce equal arguments when their
	/// elements are equal after [`IntoArg`] normalisation.
	pub fn seq<T, It>(items: It) -> Self
	where
		T: IntoArg,
		It: IntoIterator<Item = T>,
	{
		Self(Arc::new(items.into_iter().map(IntoArg::into_arg).collect::<Vec<Arg>>()))
	}

	/// Returns the elements if this argument is a sequence.
	pub fn as_seq(&self) -> Option<&[Arg]> {
		self.downcast_ref::<Vec<Arg>>().map(Vec::as_slice)
	}

	/// Returns the wrapped value if it is a `T`.
	pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
		self.0.as_any().downcast_ref::<T>()
	}

	/// Returns whether the wrapped value is a `T`.
	pub fn is<T: 'static>(&self) -> bool {
		self.0.as_any().is::<T>()
	}

	/// Name of the wrapped value's concrete type.
	pub fn type_name(&self) -> &'static str {
		self.0.type_name()
	}

	/// Type name without module paths, with sequences shown as `[..]` of
	/// their element types.
	pub fn short_type_name(&self) -> String {
		match self.as_seq() {
			Some(items) => {
				let mut names: Vec<String> = items.iter().map(Arg::short_type_name).collect();
				names.dedup();
				format!("[{}]", names.join(" | "))
			}
			None => strip_paths(self.type_name()),
		}
	}
}

/// Drops module paths from every segment of a type name
/// (`alloc::vec::Vec<u8>` becomes `Vec<u8>`).
fn strip_paths(full: &str) -> String {
	let mut out = String::with_capacity(full.len());
	let mut word = String::new();
	for c in full.chars() {
		if c.is_alphanumeric() || c == '_' {
			word.push(c);
		} else if c == ':' {
			word.clear();
		} else {
			out.push_str(&word);
			word.clear();
			out.push(c);
		}
	}
	out.push_str(&word);
	out
}

/// Conversion into a normalised [`Arg`], used by `args!`, `query!` and
/// [`Arg::seq`].
///
/// Implemented for the primitive integer types, `bool`, `char`, `()`,
/// strings, [`Arg`] itself, `Option`, small tuples, and the array-shaped
/// containers `Vec<T>`, `[T; N]` and `&'static [T]`. Other types can
/// implement it by delegating to [`Arg::new`], or be wrapped in an [`Arg`]
/// at the call site.
pub trait IntoArg {
	fn into_arg(self) -> Arg;
}

impl IntoArg for Arg {
	fn into_arg(self) -> Arg {
		self
	}
}

macro_rules! into_arg_as_is {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoArg for $ty {
				fn into_arg(self) -> Arg {
					Arg::new(self)
				}
			}
		)*
	};
}

into_arg_as_is!(
	i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, (), String, &'static str,
);

impl<T: IntoArg> IntoArg for Option<T> {
	fn into_arg(self) -> Arg {
		Arg::new(self.map(IntoArg::into_arg))
	}
}

impl<A: IntoArg, B: IntoArg> IntoArg for (A, B) {
	fn into_arg(self) -> Arg {
		Arg::new((self.0.into_arg(), self.1.into_arg()))
	}
}

impl<A: IntoArg, B: IntoArg, C: IntoArg> IntoArg for (A, B, C) {
	fn into_arg(self) -> Arg {
		Arg::new((self.0.into_arg(), self.1.into_arg(), self.2.into_arg()))
	}
}

impl<T: IntoArg> IntoArg for Vec<T> {
	fn into_arg(self) -> Arg {
		Arg::seq(self)
	}
}

impl<T: IntoArg, const N: usize> IntoArg for [T; N] {
	fn into_arg(self) -> Arg {
		Arg::seq(self)
	}
}

impl<T: IntoArg + Clone> IntoArg for &'static [T] {
	fn into_arg(self) -> Arg {
		Arg::seq(self.iter().cloned())
	}
}

impl PartialEq for Arg {
	fn eq(&self, other: &Self) -> bool {
		self.0.eq_erased(&*other.0)
	}
}

impl Eq for Arg {}

impl Hash for Arg {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.hash_erased(state);
	}
}

impl fmt::Debug for Arg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for Arg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

/// Joins arguments with `", "` for diagnostics.
pub(crate) fn join_args<T: fmt::Display>(args: &[T]) -> String {
	let mut out = String::new();
	for (idx, arg) in args.iter().enumerate() {
		if idx > 0 {
			out.push_str(", ");
		}
		out.push_str(&arg.to_string());
	}
	out
}
