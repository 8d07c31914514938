//! Verification disciplines.
//!
//! - [`DefaultCalls`]: unordered counting ("this call happened exactly N times").
//! - [`StrictCalls`]: ordered replay ("this call happened next").
//!
//! Both answer with a [`Verdict`]. Conditions that indicate a broken test
//! rather than a failed expectation are returned as [`crate::CallsError`].

mod default;
mod strict;

use std::fmt;

pub use default::DefaultCalls;
pub use strict::StrictCalls;

use crate::report::Report;
use crate::store::{CallId, CallStore};

/// Outcome of a verification.
#[must_use = "a failed verification is only reported, it does not fail the test by itself"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	Passed,
	Failed(Report),
}

impl Verdict {
	pub fn is_passed(&self) -> bool {
		matches!(self, Self::Passed)
	}

	pub fn is_failed(&self) -> bool {
		!self.is_passed()
	}

	/// Diagnostics of a failed verification.
	pub fn report(&self) -> Option<&Report> {
		match self {
			Self::Passed => None,
			Self::Failed(report) => Some(report),
		}
	}

	/// Panics with the rendered report if the verification failed.
	#[track_caller]
	pub fn assert(self) {
		if let Self::Failed(report) = self {
			panic!("verification failed:\n{report}");
		}
	}
}

impl fmt::Display for Verdict {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Passed => f.write_str("passed"),
			Self::Failed(report) => fmt::Display::fmt(report, f),
		}
	}
}

/// The "nothing left unverified" check every registry answers.
///
/// Object-safe so aggregators can sweep registries of different identifier
/// types.
pub trait VerifyNoMore {
	/// Passes iff no registered call remains.
	fn verify_no_more_invocations_with(&self, print_context: bool) -> Verdict;

	fn verify_no_more_invocations(&self) -> Verdict {
		self.verify_no_more_invocations_with(true)
	}
}

pub(crate) fn no_more_invocations<I: CallId>(store: &CallStore<I>, print_context: bool) -> Verdict {
	if store.is_empty() {
		return Verdict::Passed;
	}
	let report = store.report("Calls remaining (that were not removed):", print_context, |_| true);
	tracing::error!("{report}");
	Verdict::Failed(report)
}
