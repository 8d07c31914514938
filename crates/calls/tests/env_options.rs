//! `RegistryOptions::from_env`. Every test mutates the process environment, so
//! they run serially and restore both variables before returning.

use tattle_calls::context::{CAPTURE_ENV, PRINT_CONTEXT_ENV};
use tattle_calls::{CaptureMode, RegistryOptions};

fn with_env(capture: Option<&str>, print: Option<&str>, check: impl FnOnce()) {
	set(CAPTURE_ENV, capture);
	set(PRINT_CONTEXT_ENV, print);
	check();
	set(CAPTURE_ENV, None);
	set(PRINT_CONTEXT_ENV, None);
}

fn set(key: &str, value: Option<&str>) {
	// SAFETY: tests in this binary are serialised and no other thread reads the
	// environment while they run.
	unsafe {
		match value {
			Some(value) => std::env::set_var(key, value),
			None => std::env::remove_var(key),
		}
	}
}

#[test]
#[serial_test::serial]
fn test_unset_variables_give_defaults() {
	with_env(None, None, || {
		assert_eq!(RegistryOptions::from_env(), RegistryOptions::default());
	});
}

#[test]
#[serial_test::serial]
fn test_valid_values_are_applied() {
	with_env(Some("force_backtrace"), Some("false"), || {
		let options = RegistryOptions::from_env();
		assert_eq!(options.capture, CaptureMode::ForceBacktrace);
		assert!(!options.print_context);
	});
	with_env(Some(" backtrace "), Some("true"), || {
		let options = RegistryOptions::from_env();
		assert_eq!(options.capture, CaptureMode::Backtrace);
		assert!(options.print_context);
	});
}

#[test]
#[serial_test::serial]
fn test_unparsable_values_fall_back_to_defaults() {
	let _ = tracing_subscriber::fmt::try_init();
	with_env(Some("verbose"), Some("maybe"), || {
		assert_eq!(RegistryOptions::from_env(), RegistryOptions::default());
	});
	with_env(Some("verbose"), Some("false"), || {
		let options = RegistryOptions::from_env();
		assert_eq!(options.capture, CaptureMode::Location);
		assert!(!options.print_context);
	});
}
