//! The orchestrator tying the router, dispatcher and registry together.

use std::sync::Arc;

use aileron_core::{Callback, Error, Params, Result, Service};
use aileron_dispatch::{Dispatcher, FilterFlow, FilterPhase};
use aileron_http::{Request, Response};
use aileron_registry::Registry;
use aileron_routing::{RouteMatch, Router};
use serde_json::{Value, json};
use tracing::debug;

/// Names the engine claims for its own surface; mapping or registering
/// one of these is a configuration error.
const RESERVED_NAMES: &[&str] = &[
	"map", "register", "before", "after", "route", "dispatch", "reset",
];

/// The framework facade: an owned router, dispatcher and registry plus
/// the dispatch loop that connects them.
///
/// Each engine is an independent value; two engines share nothing.
///
/// # Examples
///
/// ```
/// use aileron::{Callback, Engine, Request};
/// use serde_json::json;
///
/// let mut engine = Engine::new();
/// engine
///     .route("/hello/@name", Callback::function(|params| {
///         Ok(json!(format!("hello {}", params[0].as_str().unwrap_or("?"))))
///     }))
///     .unwrap();
///
/// let output = engine.dispatch(&Request::get("/hello/ada")).unwrap();
/// assert_eq!(output, json!("hello ada"));
/// ```
#[derive(Default)]
pub struct Engine {
	router: Router,
	dispatcher: Dispatcher,
	registry: Registry,
}

impl Engine {
	/// Create an engine with empty tables.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a route. The spec is `[METHOD[|METHOD...] ]pattern`.
	pub fn route(&mut self, spec: &str, callback: Callback) -> Result<()> {
		self.router.register(spec, callback, false)
	}

	/// Register a route whose handler receives a route-info value as its
	/// final argument: the pattern, allowed methods, compiled regex
	/// source, bound parameters and splat segments of the match.
	pub fn route_with_info(&mut self, spec: &str, callback: Callback) -> Result<()> {
		self.router.register(spec, callback, true)
	}

	/// Map a named operation onto a callback.
	pub fn map(&mut self, name: &str, callback: Callback) -> Result<()> {
		Self::check_reserved(name)?;
		self.dispatcher.set(name, callback);
		Ok(())
	}

	/// Register a service factory under a name.
	pub fn register<F>(&mut self, name: &str, factory: F, params: Params) -> Result<()>
	where
		F: Fn(&[Value]) -> Result<Arc<dyn Service>> + Send + Sync + 'static,
	{
		Self::check_reserved(name)?;
		self.registry.register(name, factory, params);
		Ok(())
	}

	/// Register a service factory with a post-construct hook. The hook
	/// runs after every construction the registry performs for this entry.
	pub fn register_with_hook<F, H>(
		&mut self,
		name: &str,
		factory: F,
		params: Params,
		hook: H,
	) -> Result<()>
	where
		F: Fn(&[Value]) -> Result<Arc<dyn Service>> + Send + Sync + 'static,
		H: Fn(&Arc<dyn Service>) + Send + Sync + 'static,
	{
		Self::check_reserved(name)?;
		self.registry.register_with_hook(name, factory, params, hook);
		Ok(())
	}

	/// Attach a before filter to a named operation.
	pub fn before<F>(&mut self, name: &str, filter: F)
	where
		F: Fn(&mut Params, &mut Value) -> FilterFlow + Send + Sync + 'static,
	{
		self.dispatcher.hook(name, FilterPhase::Before, filter);
	}

	/// Attach an after filter to a named operation.
	pub fn after<F>(&mut self, name: &str, filter: F)
	where
		F: Fn(&mut Params, &mut Value) -> FilterFlow + Send + Sync + 'static,
	{
		self.dispatcher.hook(name, FilterPhase::After, filter);
	}

	/// Invoke a named operation through its filter chains.
	///
	/// A mapped target wins. Otherwise an `entry.method` name resolves the
	/// registry entry as a shared instance and invokes the method on it,
	/// still running any filters hooked under the full name.
	pub fn call(&mut self, name: &str, params: Params) -> Result<Value> {
		if self.dispatcher.has(name) {
			return self.dispatcher.run(name, params);
		}

		if let Some((entry, method)) = name.split_once('.')
			&& self.registry.has(entry)
		{
			let instance = self.registry.resolve(entry, true)?;
			let target = Callback::method(instance, method);
			return self.dispatcher.run_with(name, &target, params);
		}

		Err(Error::ImproperlyConfigured(format!(
			"`{}` is neither a mapped operation nor a registered entry method",
			name
		)))
	}

	/// Run the dispatch loop for one request.
	///
	/// Routes are tried in registration order. A handler returning
	/// `Value::Bool(true)` passes: the scan resumes at the next route.
	/// Any other return value ends the cycle. When no route (or no
	/// remaining route) matches, the result is [`Error::NotFound`].
	pub fn dispatch(&mut self, request: &Request) -> Result<Value> {
		self.router.reset();

		loop {
			let Some(matched) = self.router.find_next(request) else {
				return Err(Error::NotFound(request.path().to_string()));
			};

			let callback = self.resolve_callback(&matched.route.callback)?;
			let mut params: Params = matched
				.params
				.iter()
				.map(|(_, value)| match value {
					Some(v) => Value::String(v.clone()),
					None => Value::Null,
				})
				.collect();
			if matched.route.pass_route {
				params.push(route_info(&matched));
			}

			let output = self.dispatcher.execute(&callback, &params)?;
			if output == Value::Bool(true) {
				debug!(pattern = %matched.route.pattern, "handler passed");
				self.router.advance();
				continue;
			}
			return Ok(output);
		}
	}

	/// Dispatch a request and render the outcome as an HTTP response.
	///
	/// Strings become a plain-text body, `Null` a 204, any other value a
	/// JSON body; an unmatched request becomes a 404. Handler and
	/// configuration errors are propagated to the caller.
	pub fn handle(&mut self, request: &Request) -> Result<Response> {
		match self.dispatch(request) {
			Ok(Value::Null) => Ok(Response::no_content()),
			Ok(Value::String(text)) => Ok(Response::ok().with_body(text)),
			Ok(value) => Response::ok().with_json(&value),
			Err(Error::NotFound(_)) => Ok(Response::not_found()),
			Err(err) => Err(err),
		}
	}

	/// Clear all three tables: routes, operations and registry entries.
	pub fn reset(&mut self) {
		self.router.clear();
		self.dispatcher.reset();
		self.registry.reset();
	}

	/// Direct access to the route table.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Direct access to the instance registry.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	fn resolve_callback(&self, callback: &Callback) -> Result<Callback> {
		match callback {
			Callback::Registered { service, method } => {
				let instance = self.registry.resolve(service, true)?;
				Ok(Callback::method(instance, method.clone()))
			}
			other => Ok(other.clone()),
		}
	}

	fn check_reserved(name: &str) -> Result<()> {
		if RESERVED_NAMES.contains(&name) {
			return Err(Error::ImproperlyConfigured(format!(
				"`{}` is a reserved name",
				name
			)));
		}
		Ok(())
	}
}

fn route_info(matched: &RouteMatch) -> Value {
	let params: Value = matched
		.params
		.iter()
		.map(|(name, value)| (name.clone(), json!(value)))
		.collect::<serde_json::Map<String, Value>>()
		.into();

	json!({
		"pattern": matched.route.pattern,
		"methods": matched.route.methods.tokens(),
		"regex": matched.route.regex_source(),
		"params": params,
		"splat": matched.splat,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_reserved_names_rejected() {
		let mut engine = Engine::new();
		for name in RESERVED_NAMES {
			let err = engine
				.map(name, Callback::function(|_| Ok(Value::Null)))
				.unwrap_err();
			assert!(matches!(err, Error::ImproperlyConfigured(_)), "{}", name);
		}
	}

	#[test]
	fn test_route_info_shape() {
		let mut router = Router::new();
		router
			.register(
				"GET /files/@name/*",
				Callback::function(|_| Ok(Value::Null)),
				true,
			)
			.unwrap();

		let matched = router.find_next(&Request::get("/files/report/a/b")).unwrap();
		let info = route_info(&matched);

		assert_eq!(info["pattern"], json!("/files/@name/*"));
		assert_eq!(info["methods"], json!(["GET"]));
		assert_eq!(info["params"]["name"], json!("report"));
		assert_eq!(info["splat"], json!(["a", "b"]));
		assert!(info["regex"].as_str().unwrap().starts_with('^'));
	}

	#[test]
	fn test_absent_optional_param_is_null_in_route_info() {
		let mut router = Router::new();
		router
			.register("/blog(/@year)", Callback::function(|_| Ok(Value::Null)), true)
			.unwrap();

		let matched = router.find_next(&Request::get("/blog")).unwrap();
		let info = route_info(&matched);
		assert_eq!(info["params"]["year"], Value::Null);
	}
}
