use crate::factory::CallType;

/// Fatal registry errors.
///
/// These signal a defect in the test itself, never a verification outcome;
/// mismatches in count or order are reported through [`crate::Verdict`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallsError {
	/// The query matches more than one registered call.
	#[error("query {query} ambiguously matches {} registered calls: [{}]", .candidates.len(), .candidates.join(", "))]
	AmbiguousMatch {
		query: String,
		candidates: Vec<String>,
	},

	/// More than one occurrence carries the sequence number due next.
	#[error("{count} occurrences of {call} share invocation sequence number {sequence}")]
	DuplicateSequence {
		call: String,
		sequence: u64,
		count: usize,
	},

	/// The verification discipline is not offered by this registry.
	#[error("{operation} is not available on a {call_type} calls registry")]
	UnsupportedVerification {
		call_type: CallType,
		operation: &'static str,
	},
}
