//! The name-to-callable table and its chain-execution engine.

use std::collections::HashMap;
use std::sync::Arc;

use aileron_core::{Callback, Error, Params, Result};
use serde_json::Value;
use tracing::debug;

use crate::filter::{Filter, FilterFlow, FilterPhase};

/// One named operation: an optional target plus its filter chains.
#[derive(Default)]
struct Operation {
	target: Option<Callback>,
	before: Vec<Filter>,
	after: Vec<Filter>,
}

/// Name-to-callable table with ordered, short-circuiting filter chains.
///
/// The dispatcher knows nothing about routing or the instance registry;
/// registry-backed callbacks must be resolved to bound methods before
/// they reach [`Dispatcher::execute`].
#[derive(Default)]
pub struct Dispatcher {
	operations: HashMap<String, Operation>,
}

impl Dispatcher {
	/// Create an empty dispatcher.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register or overwrite the target for a named operation. Existing
	/// filters on the name are kept.
	pub fn set(&mut self, name: impl Into<String>, callback: Callback) {
		let name = name.into();
		debug!(operation = %name, "operation mapped");
		self.operations.entry(name).or_default().target = Some(callback);
	}

	/// Look up a target without invoking it.
	pub fn get(&self, name: &str) -> Option<&Callback> {
		self.operations.get(name).and_then(|op| op.target.as_ref())
	}

	/// Whether a target is mapped under this name.
	pub fn has(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Append a filter to the named phase's ordered list.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_core::Callback;
	/// use aileron_dispatch::{Dispatcher, FilterFlow, FilterPhase};
	/// use serde_json::json;
	///
	/// let mut dispatcher = Dispatcher::new();
	/// dispatcher.set("op", Callback::function(|_| Ok(json!(1))));
	/// dispatcher.hook("op", FilterPhase::After, |_params, output| {
	///     *output = json!(2);
	///     FilterFlow::Continue
	/// });
	/// assert_eq!(dispatcher.run("op", vec![]).unwrap(), json!(2));
	/// ```
	pub fn hook<F>(&mut self, name: impl Into<String>, phase: FilterPhase, filter: F)
	where
		F: Fn(&mut Params, &mut Value) -> FilterFlow + Send + Sync + 'static,
	{
		let op = self.operations.entry(name.into()).or_default();
		let filter: Filter = Arc::new(filter);
		match phase {
			FilterPhase::Before => op.before.push(filter),
			FilterPhase::After => op.after.push(filter),
		}
	}

	/// Execute the full chain for a named operation: before filters, the
	/// mapped target, after filters.
	///
	/// Running a name with no mapped target is a configuration error.
	pub fn run(&self, name: &str, params: Params) -> Result<Value> {
		let target = self.get(name).ok_or_else(|| {
			Error::ImproperlyConfigured(format!("`{}` is not a mapped operation", name))
		})?;
		self.run_chain(name, target, params)
	}

	/// Execute the named operation's filter chains around an explicit
	/// target. Used for operations whose target is resolved elsewhere
	/// (e.g. through the instance registry) but which still participate
	/// in the name's filters.
	pub fn run_with(&self, name: &str, target: &Callback, params: Params) -> Result<Value> {
		self.run_chain(name, target, params)
	}

	fn run_chain(&self, name: &str, target: &Callback, mut params: Params) -> Result<Value> {
		let mut output = Value::Null;
		let op = self.operations.get(name);

		if let Some(op) = op {
			for filter in &op.before {
				if filter(&mut params, &mut output) == FilterFlow::Stop {
					debug!(operation = %name, "before filter stopped the chain");
					return Ok(output);
				}
			}
		}

		output = self.execute(target, &params)?;

		if let Some(op) = op {
			for filter in &op.after {
				if filter(&mut params, &mut output) == FilterFlow::Stop {
					debug!(operation = %name, "after filter stopped the chain");
					break;
				}
			}
		}

		Ok(output)
	}

	/// Invoke a callable directly, with no filter chain. Route callbacks
	/// go through here: they are anonymous with respect to the dispatch
	/// table.
	///
	/// The return value is passed through unchanged; interpreting a
	/// "continue to next route" signal is the orchestrator's job.
	pub fn execute(&self, callback: &Callback, params: &[Value]) -> Result<Value> {
		match callback {
			Callback::Function(f) => f(params),
			Callback::Method { service, method } => service.call(method, params),
			Callback::Registered { service, method } => Err(Error::ImproperlyConfigured(format!(
				"callback `{}.{}` must be resolved through the registry before execution",
				service, method
			))),
		}
	}

	/// Drop one operation: its target and both filter chains.
	pub fn clear(&mut self, name: &str) {
		self.operations.remove(name);
	}

	/// Drop every operation.
	pub fn reset(&mut self) {
		self.operations.clear();
	}
}
