//! Route definition: a compiled (pattern, methods, callback) triple.

use aileron_core::{Callback, Error, Result};
use hyper::Method;

use crate::pattern::{PathMatch, PathPattern};

/// The HTTP methods a route responds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSet {
	/// Matches any method.
	Any,
	/// Matches only the listed methods.
	Only(Vec<Method>),
}

impl MethodSet {
	/// Parse a `|`-joined method list, e.g. `GET|POST`. A `*` token means
	/// any method.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_routing::MethodSet;
	/// use hyper::Method;
	///
	/// let set = MethodSet::parse("GET|POST").unwrap();
	/// assert!(set.allows(&Method::GET));
	/// assert!(!set.allows(&Method::DELETE));
	/// ```
	pub fn parse(spec: &str) -> Result<Self> {
		if spec == "*" {
			return Ok(Self::Any);
		}
		let methods = spec
			.split('|')
			.map(|token| {
				token
					.trim()
					.to_ascii_uppercase()
					.parse::<Method>()
					.map_err(|_| {
						Error::Pattern(format!("`{}` is not a valid HTTP method", token))
					})
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(Self::Only(methods))
	}

	/// Whether this set admits the given method.
	pub fn allows(&self, method: &Method) -> bool {
		match self {
			Self::Any => true,
			Self::Only(methods) => methods.contains(method),
		}
	}

	/// Method tokens for diagnostics and route-info values; the any-method
	/// sentinel renders as `*`.
	pub fn tokens(&self) -> Vec<String> {
		match self {
			Self::Any => vec!["*".to_string()],
			Self::Only(methods) => methods.iter().map(|m| m.to_string()).collect(),
		}
	}
}

/// A registered route. Immutable once constructed; matching state lives in
/// the router's cursor and the per-call [`RouteMatch`](crate::RouteMatch),
/// never here.
#[derive(Debug, Clone)]
pub struct Route {
	pub methods: MethodSet,
	/// The path part of the registration spec, for diagnostics.
	pub pattern: String,
	matcher: PathPattern,
	pub callback: Callback,
	/// When true, a route-info value is appended as the final call
	/// argument.
	pub pass_route: bool,
}

impl Route {
	/// Compile a registration spec into a route.
	///
	/// The spec is `[METHOD[|METHOD...] ]path`: an optional leading method
	/// token separated by whitespace, then the path pattern.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_core::Callback;
	/// use aileron_routing::Route;
	/// use hyper::Method;
	/// use serde_json::json;
	///
	/// let route = Route::new(
	///     "GET|HEAD /health",
	///     Callback::function(|_| Ok(json!("ok"))),
	///     false,
	///     true,
	/// )
	/// .unwrap();
	/// assert!(route.allows_method(&Method::HEAD));
	/// assert_eq!(route.pattern, "/health");
	/// ```
	pub fn new(
		spec: &str,
		callback: Callback,
		pass_route: bool,
		case_sensitive: bool,
	) -> Result<Self> {
		let spec = spec.trim();
		let (methods, path) = match spec.split_once(char::is_whitespace) {
			Some((prefix, rest)) => (MethodSet::parse(prefix)?, rest.trim_start()),
			None => (MethodSet::Any, spec),
		};
		if path.is_empty() {
			return Err(Error::Pattern(format!("`{}` has no path", spec)));
		}

		let matcher = PathPattern::compile(path, case_sensitive)?;

		Ok(Self {
			methods,
			pattern: path.to_string(),
			matcher,
			callback,
			pass_route,
		})
	}

	/// Whether the route responds to the given HTTP method.
	pub fn allows_method(&self, method: &Method) -> bool {
		self.methods.allows(method)
	}

	/// Attempt to match a request path against the compiled pattern.
	pub fn matches(&self, path: &str) -> Option<PathMatch> {
		self.matcher.matches(path)
	}

	/// Source of the compiled regex, exposed in route-info values.
	pub fn regex_source(&self) -> &str {
		self.matcher.regex_source()
	}
}
