/// Builds a `Vec<Arg>` of recorded arguments, each converted with
/// [`IntoArg`](crate::IntoArg).
///
/// ```
/// use tattle_calls::{Arg, args};
///
/// let recorded = args![1, "two", vec![3, 4]];
/// assert_eq!(recorded.len(), 3);
/// assert_eq!(recorded[2], Arg::seq([3, 4]));
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
	() => {
		::std::vec::Vec::<$crate::Arg>::new()
	};
	($($arg:expr),+ $(,)?) => {
		::std::vec![$($crate::IntoArg::into_arg($arg)),+]
	};
}

/// Builds a `Vec<QueryArg>`; plain values become literals, matchers stay
/// matchers.
///
/// Literals compare by concrete type. An unsuffixed integer literal is an
/// `i32`, so it never matches a recorded `usize` or `u64`: write `10_usize`.
/// Failure reports list the recorded argument types to make such a mismatch
/// visible.
///
/// ```
/// use tattle_calls::matcher::{any, predicate};
/// use tattle_calls::query;
///
/// let q = query![1, any(), predicate(|n: &i32| *n > 0)];
/// assert_eq!(q.len(), 3);
/// ```
#[macro_export]
macro_rules! query {
	() => {
		::std::vec::Vec::<$crate::QueryArg>::new()
	};
	($($arg:expr),+ $(,)?) => {
		::std::vec![$($crate::IntoQueryArg::into_query_arg($arg)),+]
	};
}

/// Name of the enclosing function, without its module path.
///
/// Closures are attributed to the function that defines them.
#[macro_export]
macro_rules! calls_fn_name {
	() => {{
		fn __tattle_probe() {}
		fn __tattle_type_name_of<T>(_: T) -> &'static str {
			::std::any::type_name::<T>()
		}
		$crate::__private::last_path_segment(__tattle_type_name_of(__tattle_probe))
	}};
}

/// Registers a call identified by the name of the enclosing function.
///
/// Works for registries keyed by `&'static str` or `String`.
///
/// ```
/// use tattle_calls::{DefaultCalls, Invoked, VerifyNoMore, query, register_call};
///
/// struct Greeter {
/// 	calls: DefaultCalls<&'static str>,
/// }
///
/// impl Greeter {
/// 	fn greet(&mut self, name: &str) {
/// 		register_call!(self.calls; name.to_owned());
/// 	}
/// }
///
/// let mut greeter = Greeter { calls: DefaultCalls::new() };
/// greeter.greet("bob");
/// let verdict = greeter
/// 	.calls
/// 	.verify_and_remove_call(Invoked::ONCE, "greet", query!["bob"])
/// 	.unwrap();
/// assert!(verdict.is_passed());
/// assert!(greeter.calls.verify_no_more_invocations().is_passed());
/// ```
#[macro_export]
macro_rules! register_call {
	($calls:expr $(; $($arg:expr),* $(,)?)?) => {
		($calls).register_call(
			::std::convert::From::from($crate::calls_fn_name!()),
			$crate::args![$($($arg),*)?],
		)
	};
}

#[doc(hidden)]
pub mod __private {
	/// Trims the probe function and closure segments from a `type_name` path
	/// and returns the last remaining segment.
	pub fn last_path_segment(path: &'static str) -> &'static str {
		let mut path = path.strip_suffix("::__tattle_probe").unwrap_or(path);
		while let Some(outer) = path.strip_suffix("::{{closure}}") {
			path = outer;
		}
		match path.rfind("::") {
			Some(pos) => &path[pos + 2..],
			None => path,
		}
	}
}
