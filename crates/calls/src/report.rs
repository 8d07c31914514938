//! Failure diagnostics.
//!
//! A [`Report`] is a summary line followed by a listing of registry entries:
//! the call, its arguments, how many times it was invoked and, when context
//! printing is on, one block per occurrence labelled with its position in the
//! registry's global invocation order.
//!
//! ```text
//! Calls remaining (that were not removed):
//!  * Call: "greet", Args: ["bob"], Arg types: [String], Times invoked: 2, Contexts:
//!  |__[ Context for call[0] (1st invocation on this mock): ]
//!  |	-> at tests/greeter.rs:14:9
//!  |__[ Context for call[1] (3rd invocation on this mock): ]
//!   	-> at tests/greeter.rs:16:9
//! ```

use std::fmt;

/// Formats a 1-based cardinal as an English ordinal (`1st`, `12th`, `22nd`).
pub fn ordinal(cardinal: u64) -> String {
	let suffix = if cardinal % 10 == 1 && cardinal != 11 {
		"st"
	} else if cardinal % 10 == 2 && cardinal != 12 {
		"nd"
	} else if cardinal % 10 == 3 && cardinal != 13 {
		"rd"
	} else {
		"th"
	};
	format!("{cardinal}{suffix}")
}

/// Rendered diagnostics for one failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
	summary: String,
	entries: Vec<ReportEntry>,
}

impl Report {
	pub(crate) fn new(summary: impl Into<String>, entries: Vec<ReportEntry>) -> Self {
		Self {
			summary: summary.into(),
			entries,
		}
	}

	/// One-line description of what went wrong.
	pub fn summary(&self) -> &str {
		&self.summary
	}

	/// Registry entries relevant to the failure.
	pub fn entries(&self) -> &[ReportEntry] {
		&self.entries
	}

	/// The entry listing without the summary line.
	pub fn listing(&self) -> Listing<'_> {
		Listing(&self.entries)
	}
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", self.summary)?;
		fmt::Display::fmt(&self.listing(), f)
	}
}

/// Display adapter over report entries, see [`Report::listing`].
pub struct Listing<'a>(&'a [ReportEntry]);

impl fmt::Display for Listing<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str(" (no registered invocations)");
		}
		for (idx, entry) in self.0.iter().enumerate() {
			if idx > 0 {
				writeln!(f)?;
			}
			fmt::Display::fmt(entry, f)?;
		}
		Ok(())
	}
}

/// One registered call in a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
	pub(crate) call: String,
	pub(crate) args: String,
	pub(crate) arg_types: Vec<String>,
	pub(crate) times: usize,
	pub(crate) occurrences: Option<Vec<OccurrenceLine>>,
}

impl ReportEntry {
	/// Rendered identifier.
	pub fn call(&self) -> &str {
		&self.call
	}

	/// Comma-joined rendered arguments.
	pub fn args(&self) -> &str {
		&self.args
	}

	/// Short type name of each argument, in position order.
	pub fn arg_types(&self) -> &[String] {
		&self.arg_types
	}

	/// Number of registered occurrences.
	pub fn times(&self) -> usize {
		self.times
	}

	/// Per-occurrence context, `None` when context printing was off.
	pub fn occurrences(&self) -> Option<&[OccurrenceLine]> {
		self.occurrences.as_deref()
	}
}

impl fmt::Display for ReportEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, " * Call: {}, Args: [{}], ", self.call, self.args)?;
		if !self.arg_types.is_empty() {
			write!(f, "Arg types: [{}], ", self.arg_types.join(", "))?;
		}
		write!(f, "Times invoked: {}", self.times)?;
		let Some(occurrences) = &self.occurrences else {
			return f.write_str(".");
		};
		f.write_str(", Contexts:")?;
		for (idx, occurrence) in occurrences.iter().enumerate() {
			let gutter = if idx + 1 < occurrences.len() { " |" } else { "  " };
			write!(
				f,
				"\n |__[ Context for call[{idx}] ({} invocation on this mock): ]",
				ordinal(occurrence.sequence + 1)
			)?;
			for line in &occurrence.context {
				write!(f, "\n{gutter}\t-> {line}")?;
			}
		}
		Ok(())
	}
}

/// Context of one occurrence in a [`ReportEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceLine {
	pub(crate) sequence: u64,
	pub(crate) context: Vec<String>,
}

impl OccurrenceLine {
	/// Zero-based global sequence number of the occurrence.
	pub fn sequence(&self) -> u64 {
		self.sequence
	}

	/// Rendered context lines, call site first.
	pub fn context(&self) -> &[String] {
		&self.context
	}
}
