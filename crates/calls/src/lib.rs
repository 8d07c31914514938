//! Call registration and verification for hand-written test doubles.
//!
//! A test double records every invocation it receives in a registry; the test
//! later asks the registry whether the expected invocations happened.
//!
//! # Mental Model
//!
//! 1. **Recording:** the double calls [`DefaultCalls::register_call`] (or
//!    [`register_call!`], which infers the identifier from the enclosing
//!    function name). Each registration appends an occurrence with a
//!    registry-wide sequence number and the call site.
//! 2. **Lookup:** a verification describes the call with [`QueryArg`]s, which
//!    are literals or [`Matcher`]s, and resolves to at most one registered
//!    call. A query matching several registered calls is an error.
//! 3. **Verification:** [`DefaultCalls`] counts occurrences;
//!    [`StrictCalls`] replays the global invocation order one occurrence at a
//!    time. Either answers with a [`Verdict`] whose failure carries a
//!    [`Report`] listing what was actually registered.
//! 4. **Sweep:** [`VerifyNoMore`] confirms that every registered call was
//!    verified and removed.
//!
//! # Errors
//!
//! Mismatched counts or orders are ordinary [`Verdict::Failed`] values.
//! Ambiguous queries, duplicate sequence numbers and verifications the
//! registry does not offer are [`CallsError`]s: they mean the test itself is
//! wrong.
//!
//! # Concurrency
//!
//! Registries are plain owned values with no internal locking. Wrap one in a
//! `RefCell` or mutex when a double needs to record through `&self`.

pub mod arg;
pub mod call;
pub mod context;
pub mod error;
pub mod factory;
mod macros;
pub mod matcher;
pub mod report;
mod store;
pub mod verify;

pub use arg::{Arg, ArgValue, IntoArg};
pub use call::{Call, CallQuery, Invoked};
pub use context::{CallContext, CaptureMode, RegistryOptions};
pub use error::CallsError;
pub use factory::{AnyCalls, CallType};
#[doc(hidden)]
pub use macros::__private;
pub use matcher::{ArgMatcher, IntoQueryArg, Matcher, QueryArg};
pub use report::{OccurrenceLine, Report, ReportEntry, ordinal};
pub use store::{CallId, Occurrence};
pub use verify::{DefaultCalls, StrictCalls, Verdict, VerifyNoMore};
