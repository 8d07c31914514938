//! Test doubles and the registry that sweeps them.
//!
//! A test double owns a calls registry (see [`tattle_calls`]) and exposes it
//! through [`Mock`]. Registering every double of a test in a [`MocksRegistry`]
//! gives a single "nothing unverified anywhere" check at the end of the test.

mod mock;
mod registry;

pub use mock::Mock;
pub use registry::{MocksError, MocksRegistry};
pub use tattle_calls as calls;
