//! Filter chain building blocks.

use std::sync::Arc;

use aileron_core::Params;
use serde_json::Value;

/// Signal returned by a filter: keep going or truncate the chain.
///
/// A stop is an intentional control signal, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFlow {
	Continue,
	Stop,
}

/// Which side of the target a filter runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
	Before,
	After,
}

/// A shared interceptor over a named operation's parameters and pending
/// output.
pub type Filter = Arc<dyn Fn(&mut Params, &mut Value) -> FilterFlow + Send + Sync>;
