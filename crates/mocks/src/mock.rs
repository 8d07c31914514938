use std::any::type_name;
use std::cell::RefCell;

use tattle_calls::{Verdict, VerifyNoMore};

/// A test double whose recorded calls can be swept for leftovers.
pub trait Mock {
	/// Passes iff every call this double recorded has been verified and removed.
	fn verify_no_more_invocations(&self, print_context: bool) -> Verdict;

	/// Name used in diagnostics.
	fn mock_name(&self) -> &'static str {
		type_name::<Self>()
	}
}

impl<C: VerifyNoMore> Mock for RefCell<C> {
	fn verify_no_more_invocations(&self, print_context: bool) -> Verdict {
		self.borrow().verify_no_more_invocations_with(print_context)
	}

	fn mock_name(&self) -> &'static str {
		type_name::<C>()
	}
}

impl<C: VerifyNoMore> Mock for parking_lot::Mutex<C> {
	fn verify_no_more_invocations(&self, print_context: bool) -> Verdict {
		self.lock().verify_no_more_invocations_with(print_context)
	}

	fn mock_name(&self) -> &'static str {
		type_name::<C>()
	}
}
