//! Ordered route collection with a scan cursor.
//!
//! The cursor is what implements "passing": a handler signals "not my
//! request" by returning the continue value, and the orchestrator calls
//! [`Router::advance`] and asks again. The router itself knows nothing
//! about handler semantics.

use std::sync::Arc;

use aileron_core::{Callback, Result};
use aileron_http::Request;
use tracing::debug;

use crate::route::Route;

/// A matched route together with the values bound by this match.
///
/// Bound state lives here, never on the [`Route`], so routes stay
/// immutable and shareable across matching attempts.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	pub route: Arc<Route>,
	/// Parameter bindings in declaration order; `None` marks a parameter
	/// inside an optional group that did not participate in the match.
	pub params: Vec<(String, Option<String>)>,
	/// Wildcard capture split into path segments.
	pub splat: Vec<String>,
}

impl RouteMatch {
	/// Look up a bound parameter value.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params
			.iter()
			.find(|(n, _)| n == name)
			.and_then(|(_, v)| v.as_deref())
	}
}

/// Ordered route table plus the per-dispatch scan cursor.
///
/// Insertion order is priority order. The cursor must be [`reset`] at the
/// start of every top-level dispatch cycle; matches from one request must
/// not leak into the next.
///
/// [`reset`]: Router::reset
pub struct Router {
	routes: Vec<Arc<Route>>,
	cursor: usize,
	last_match: Option<usize>,
	case_sensitive: bool,
}

impl Router {
	/// Create an empty router. Literal matching is case-insensitive by
	/// default.
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			cursor: 0,
			last_match: None,
			case_sensitive: false,
		}
	}

	/// Set literal-segment case sensitivity. Applies to routes registered
	/// after the call.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_core::Callback;
	/// use aileron_http::Request;
	/// use aileron_routing::Router;
	/// use serde_json::json;
	///
	/// let mut router = Router::new().with_case_sensitive(true);
	/// router
	///     .register("/About", Callback::function(|_| Ok(json!(null))), false)
	///     .unwrap();
	/// assert!(router.find_next(&Request::get("/about")).is_none());
	/// ```
	pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
		self.case_sensitive = case_sensitive;
		self
	}

	/// Compile and append a route. Fails only on malformed pattern syntax.
	pub fn register(&mut self, spec: &str, callback: Callback, pass_route: bool) -> Result<()> {
		let route = Route::new(spec, callback, pass_route, self.case_sensitive)?;
		debug!(pattern = %route.pattern, methods = ?route.methods.tokens(), "route registered");
		self.routes.push(Arc::new(route));
		Ok(())
	}

	/// Find the first route at or past the cursor that matches the
	/// request. Does not move the cursor: repeated calls without an
	/// intervening [`advance`](Router::advance) return the same route.
	pub fn find_next(&mut self, request: &Request) -> Option<RouteMatch> {
		let path = request.path();

		for (index, route) in self.routes.iter().enumerate().skip(self.cursor) {
			if !route.allows_method(&request.method) {
				continue;
			}
			if let Some(matched) = route.matches(path) {
				debug!(pattern = %route.pattern, index, %path, "route matched");
				self.last_match = Some(index);
				return Some(RouteMatch {
					route: Arc::clone(route),
					params: matched.params,
					splat: matched.splat,
				});
			}
		}

		debug!(%path, cursor = self.cursor, "no route matched");
		None
	}

	/// Move the cursor one past the route returned by the last successful
	/// [`find_next`](Router::find_next). A no-op when nothing has matched
	/// since the last reset or advance.
	pub fn advance(&mut self) {
		if let Some(index) = self.last_match.take() {
			self.cursor = index + 1;
			debug!(cursor = self.cursor, "router advanced");
		}
	}

	/// Rewind the cursor for a new dispatch cycle.
	pub fn reset(&mut self) {
		self.cursor = 0;
		self.last_match = None;
	}

	/// All registered routes, in priority order.
	pub fn routes(&self) -> &[Arc<Route>] {
		&self.routes
	}

	/// Drop every registered route and rewind the cursor.
	pub fn clear(&mut self) {
		self.routes.clear();
		self.reset();
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::{Value, json};

	fn tagged(tag: &str) -> Callback {
		let tag = tag.to_string();
		Callback::function(move |_| Ok(Value::String(tag.clone())))
	}

	fn run(callback: &Callback) -> Value {
		match callback {
			Callback::Function(f) => f(&[]).unwrap(),
			_ => panic!("expected a function callback"),
		}
	}

	#[test]
	fn test_first_in_order_wins() {
		let mut router = Router::new();
		router.register("/users/@id", tagged("first"), false).unwrap();
		router.register("/users/*", tagged("second"), false).unwrap();

		let request = Request::get("/users/42");
		let matched = router.find_next(&request).unwrap();
		assert_eq!(run(&matched.route.callback), json!("first"));
	}

	#[test]
	fn test_find_next_is_idempotent() {
		let mut router = Router::new();
		router.register("/a", tagged("a"), false).unwrap();

		let request = Request::get("/a");
		let first = router.find_next(&request).unwrap();
		let second = router.find_next(&request).unwrap();
		assert_eq!(first.route.pattern, second.route.pattern);
	}

	#[test]
	fn test_advance_skips_matched_route() {
		let mut router = Router::new();
		router.register("/users/@id", tagged("first"), false).unwrap();
		router.register("/users/*", tagged("second"), false).unwrap();

		let request = Request::get("/users/42");
		router.find_next(&request).unwrap();
		router.advance();

		let matched = router.find_next(&request).unwrap();
		assert_eq!(run(&matched.route.callback), json!("second"));

		router.advance();
		assert!(router.find_next(&request).is_none());
	}

	#[test]
	fn test_advance_without_match_is_noop() {
		let mut router = Router::new();
		router.register("/a", tagged("a"), false).unwrap();

		router.advance();
		let request = Request::get("/a");
		assert!(router.find_next(&request).is_some());
	}

	#[test]
	fn test_method_mismatch_skips_route() {
		let mut router = Router::new();
		router.register("POST /users", tagged("create"), false).unwrap();
		router.register("GET /users", tagged("list"), false).unwrap();

		let matched = router.find_next(&Request::get("/users")).unwrap();
		assert_eq!(run(&matched.route.callback), json!("list"));
	}

	#[test]
	fn test_reset_rewinds_cursor() {
		let mut router = Router::new();
		router.register("/a", tagged("a"), false).unwrap();

		let request = Request::get("/a");
		router.find_next(&request).unwrap();
		router.advance();
		assert!(router.find_next(&request).is_none());

		router.reset();
		assert!(router.find_next(&request).is_some());
	}

	#[test]
	fn test_match_state_lives_on_route_match() {
		let mut router = Router::new();
		router.register("/users/@id", tagged("user"), false).unwrap();

		let matched = router.find_next(&Request::get("/users/42")).unwrap();
		assert_eq!(matched.param("id"), Some("42"));
		assert_eq!(matched.param("missing"), None);
	}

	#[test]
	fn test_query_string_excluded_from_matching() {
		let mut router = Router::new();
		router.register("/search", tagged("search"), false).unwrap();

		assert!(router.find_next(&Request::get("/search?q=x")).is_some());
	}
}
