//! Diagnostic context captured at registration time, and registry options.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;
use std::sync::Arc;
use std::{env, fmt, thread};

use strum::{Display, EnumString};

/// Environment variable selecting the [`CaptureMode`] for [`RegistryOptions::from_env`].
pub const CAPTURE_ENV: &str = "TATTLE_CALL_CONTEXT";
/// Environment variable toggling [`RegistryOptions::print_context`].
pub const PRINT_CONTEXT_ENV: &str = "TATTLE_PRINT_CONTEXT";

/// How much context is recorded for each registered occurrence.
#[derive(Debug, Default, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CaptureMode {
	/// Call site only.
	#[default]
	Location,
	/// Call site plus a backtrace when `RUST_BACKTRACE` enables one.
	Backtrace,
	/// Call site plus an unconditional backtrace.
	ForceBacktrace,
}

/// Registry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryOptions {
	/// Context recorded per occurrence.
	pub capture: CaptureMode,
	/// Whether failure diagnostics list per-occurrence context.
	pub print_context: bool,
}

impl Default for RegistryOptions {
	fn default() -> Self {
		Self {
			capture: CaptureMode::Location,
			print_context: true,
		}
	}
}

impl RegistryOptions {
	/// Reads [`CAPTURE_ENV`] and [`PRINT_CONTEXT_ENV`], falling back to the
	/// defaults for unset or unparsable values.
	pub fn from_env() -> Self {
		let mut options = Self::default();
		if let Ok(raw) = env::var(CAPTURE_ENV) {
			match raw.trim().parse::<CaptureMode>() {
				Ok(mode) => options.capture = mode,
				Err(_) => tracing::warn!(var = CAPTURE_ENV, value = %raw, "ignoring unknown capture mode"),
			}
		}
		if let Ok(raw) = env::var(PRINT_CONTEXT_ENV) {
			match raw.trim().parse::<bool>() {
				Ok(print) => options.print_context = print,
				Err(_) => tracing::warn!(var = PRINT_CONTEXT_ENV, value = %raw, "ignoring non-boolean value"),
			}
		}
		options
	}

	pub fn with_capture(mut self, capture: CaptureMode) -> Self {
		self.capture = capture;
		self
	}

	pub fn with_print_context(mut self, print_context: bool) -> Self {
		self.print_context = print_context;
		self
	}
}

/// Where and on which thread an occurrence was registered.
#[derive(Clone)]
pub struct CallContext {
	location: &'static Location<'static>,
	thread: Option<String>,
	backtrace: Option<Arc<Backtrace>>,
}

impl CallContext {
	/// Captures the caller's context.
	#[track_caller]
	pub fn capture(mode: CaptureMode) -> Self {
		let backtrace = match mode {
			CaptureMode::Location => None,
			CaptureMode::Backtrace => Some(Backtrace::capture()),
			CaptureMode::ForceBacktrace => Some(Backtrace::force_capture()),
		}
		.filter(|bt| bt.status() == BacktraceStatus::Captured)
		.map(Arc::new);

		Self {
			location: Location::caller(),
			thread: thread::current().name().map(str::to_owned),
			backtrace,
		}
	}

	pub fn location(&self) -> &'static Location<'static> {
		self.location
	}

	pub fn thread_name(&self) -> Option<&str> {
		self.thread.as_deref()
	}

	pub fn backtrace(&self) -> Option<&Backtrace> {
		self.backtrace.as_deref()
	}

	/// Renders the context as report lines, call site first.
	pub(crate) fn lines(&self) -> Vec<String> {
		let mut lines = Vec::new();
		match &self.thread {
			Some(name) => lines.push(format!("at {} (thread {name})", self.location)),
			None => lines.push(format!("at {}", self.location)),
		}
		if let Some(bt) = &self.backtrace {
			lines.extend(bt.to_string().lines().map(|line| line.trim_end().to_owned()));
		}
		lines
	}
}

impl fmt::Debug for CallContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallContext")
			.field("location", &format_args!("{}", self.location))
			.field("thread", &self.thread)
			.field("backtrace", &self.backtrace.is_some())
			.finish()
	}
}
