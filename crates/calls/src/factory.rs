//! Choosing a verification discipline at runtime.

use strum::{Display, EnumString};

use crate::arg::Arg;
use crate::call::{Call, CallQuery, Invoked};
use crate::context::RegistryOptions;
use crate::error::CallsError;
use crate::matcher::QueryArg;
use crate::store::CallId;
use crate::verify::{DefaultCalls, StrictCalls, Verdict, VerifyNoMore};

/// Verification discipline of a registry.
#[derive(Debug, Default, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CallType {
	/// Unordered counting verification.
	#[default]
	Default,
	/// Ordered, one-occurrence-at-a-time verification.
	Strict,
}

impl CallType {
	/// Builds an empty registry of this kind.
	pub fn build<I: CallId>(self) -> AnyCalls<I> {
		self.build_with(RegistryOptions::default())
	}

	pub fn build_with<I: CallId>(self, options: RegistryOptions) -> AnyCalls<I> {
		match self {
			Self::Default => AnyCalls::Default(DefaultCalls::with_options(options)),
			Self::Strict => AnyCalls::Strict(StrictCalls::with_options(options)),
		}
	}
}

/// A registry whose discipline was picked at runtime.
///
/// Every verification is available; the one the underlying registry does not
/// offer returns [`CallsError::UnsupportedVerification`].
pub enum AnyCalls<I> {
	Default(DefaultCalls<I>),
	Strict(StrictCalls<I>),
}

impl<I: CallId> AnyCalls<I> {
	pub fn call_type(&self) -> CallType {
		match self {
			Self::Default(_) => CallType::Default,
			Self::Strict(_) => CallType::Strict,
		}
	}

	#[track_caller]
	pub fn register_call(&mut self, id: I, args: Vec<Arg>) {
		match self {
			Self::Default(calls) => calls.register_call(id, args),
			Self::Strict(calls) => calls.register_call(id, args),
		}
	}

	#[track_caller]
	pub fn register(&mut self, call: Call<I>) {
		match self {
			Self::Default(calls) => calls.register(call),
			Self::Strict(calls) => calls.register(call),
		}
	}

	pub fn verify_call(&self, times: Invoked, id: I, args: Vec<QueryArg>) -> Result<Verdict, CallsError> {
		self.verify(times, &CallQuery::new(id, args))
	}

	pub fn verify(&self, times: Invoked, query: &CallQuery<I>) -> Result<Verdict, CallsError> {
		match self {
			Self::Default(calls) => calls.verify(times, query),
			Self::Strict(_) => Err(self.unsupported("counting verification")),
		}
	}

	pub fn verify_and_remove_call(
		&mut self,
		times: Invoked,
		id: I,
		args: Vec<QueryArg>,
	) -> Result<Verdict, CallsError> {
		self.verify_and_remove(times, &CallQuery::new(id, args))
	}

	pub fn verify_and_remove(&mut self, times: Invoked, query: &CallQuery<I>) -> Result<Verdict, CallsError> {
		match self {
			Self::Default(calls) => calls.verify_and_remove(times, query),
			Self::Strict(_) => Err(self.unsupported("counting verification")),
		}
	}

	pub fn verify_strictly_and_remove_call(&mut self, id: I, args: Vec<QueryArg>) -> Result<Verdict, CallsError> {
		self.verify_strictly_and_remove(&CallQuery::new(id, args))
	}

	pub fn verify_strictly_and_remove(&mut self, query: &CallQuery<I>) -> Result<Verdict, CallsError> {
		match self {
			Self::Strict(calls) => calls.verify_strictly_and_remove(query),
			Self::Default(_) => Err(self.unsupported("strict verification")),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Self::Default(calls) => calls.len(),
			Self::Strict(calls) => calls.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn reset(&mut self) {
		match self {
			Self::Default(calls) => calls.reset(),
			Self::Strict(calls) => calls.reset(),
		}
	}

	fn unsupported(&self, operation: &'static str) -> CallsError {
		let err = CallsError::UnsupportedVerification {
			call_type: self.call_type(),
			operation,
		};
		tracing::error!("{err}");
		err
	}
}

impl<I: CallId> VerifyNoMore for AnyCalls<I> {
	fn verify_no_more_invocations_with(&self, print_context: bool) -> Verdict {
		match self {
			Self::Default(calls) => calls.verify_no_more_invocations_with(print_context),
			Self::Strict(calls) => calls.verify_no_more_invocations_with(print_context),
		}
	}
}
