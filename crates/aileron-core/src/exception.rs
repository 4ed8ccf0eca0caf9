//! Framework error taxonomy.
//!
//! Configuration errors (malformed patterns, reserved names, unregistered
//! registry entries) are fatal to the call that raised them and never
//! retried. A handler failure is carried through unmodified so the caller
//! above the dispatch loop remains its sole consumer.

use thiserror::Error;

/// Result alias used across all framework crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the routing, dispatch and registry layers.
#[derive(Debug, Error)]
pub enum Error {
	/// A route pattern failed to compile.
	#[error("invalid route pattern: {0}")]
	Pattern(String),

	/// A registration or resolution call was misused: mapping a reserved
	/// name, resolving an unregistered registry entry, running an unmapped
	/// operation, or executing an unresolved registry-backed callback.
	#[error("improperly configured: {0}")]
	ImproperlyConfigured(String),

	/// No route matched the request. Not a defect; the orchestrator turns
	/// this into a not-found response.
	#[error("not found: {0}")]
	NotFound(String),

	/// A handler or filter target failed. Propagated unmodified.
	#[error(transparent)]
	Handler(#[from] anyhow::Error),
}

impl Error {
	/// Returns true for errors caused by framework misconfiguration, as
	/// opposed to a missing route or a failing handler.
	pub fn is_configuration(&self) -> bool {
		matches!(self, Error::Pattern(_) | Error::ImproperlyConfigured(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_configuration_classification() {
		assert!(Error::Pattern("(".into()).is_configuration());
		assert!(Error::ImproperlyConfigured("reserved".into()).is_configuration());
		assert!(!Error::NotFound("/missing".into()).is_configuration());
	}

	#[test]
	fn test_handler_errors_pass_through() {
		let inner = anyhow::anyhow!("database unavailable");
		let err: Error = inner.into();
		assert_eq!(err.to_string(), "database unavailable");
	}
}
