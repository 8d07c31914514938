//! Aggregate verification across every double of a test.

use std::rc::Rc;

use crate::Mock;

/// Lazily resolved mock, for doubles created after registration (e.g. by an
/// injector).
type MockProvider = Box<dyn FnOnce() -> Rc<dyn Mock>>;

/// Errors raised by [`MocksRegistry`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum MocksError {
	/// The mock was never registered (or was already deregistered).
	#[error("mock {mock} tried to deregister itself, but no registration was found")]
	NotRegistered { mock: &'static str },
}

/// The mocks of one test.
///
/// Mocks are identified by pointer, so registering the same `Rc` twice is a
/// no-op. The registry only iterates its mocks and asks each one about its
/// own calls; no state is shared between them.
#[derive(Default)]
pub struct MocksRegistry {
	mocks: Vec<Rc<dyn Mock>>,
	providers: Vec<MockProvider>,
}

impl MocksRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry holding `mocks`.
	pub fn with_mocks(mocks: impl IntoIterator<Item = Rc<dyn Mock>>) -> Self {
		let mut registry = Self::new();
		for mock in mocks {
			registry.register_mock(mock);
		}
		registry
	}

	/// Registers a mock. Returns `false` if it was already registered.
	pub fn register_mock(&mut self, mock: Rc<dyn Mock>) -> bool {
		if self.position(&mock).is_some() {
			return false;
		}
		self.mocks.push(mock);
		true
	}

	/// Registers a mock that is only materialised on the next sweep or
	/// deregistration.
	pub fn register_provider(&mut self, provider: impl FnOnce() -> Rc<dyn Mock> + 'static) {
		self.providers.push(Box::new(provider));
	}

	/// Removes a registered mock.
	pub fn deregister_mock(&mut self, mock: &Rc<dyn Mock>) -> Result<(), MocksError> {
		self.resolve_providers();
		let position = self.position(mock);
		tracing::debug!(mock = mock.mock_name(), found = position.is_some(), "deregistering mock");
		match position {
			Some(position) => {
				self.mocks.remove(position);
				Ok(())
			}
			None => Err(MocksError::NotRegistered {
				mock: mock.mock_name(),
			}),
		}
	}

	/// Checks every registered mock for calls that were never verified and
	/// removed.
	///
	/// Every mock is checked, so each one with leftovers gets reported.
	pub fn verify_no_more_invocations_anywhere(&mut self) -> bool {
		self.resolve_providers();
		let mut clean = true;
		for mock in &self.mocks {
			let verdict = mock.verify_no_more_invocations(false);
			if verdict.is_failed() {
				tracing::error!(mock = mock.mock_name(), "unverified calls remain");
				clean = false;
			}
		}
		clean
	}

	/// Number of registered mocks, providers included.
	pub fn len(&self) -> usize {
		self.mocks.len() + self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn resolve_providers(&mut self) {
		for provider in std::mem::take(&mut self.providers) {
			self.register_mock(provider());
		}
	}

	fn position(&self, mock: &Rc<dyn Mock>) -> Option<usize> {
		self.mocks
			.iter()
			.position(|registered| std::ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(mock)))
	}
}
