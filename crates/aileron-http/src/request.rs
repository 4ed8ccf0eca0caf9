//! HTTP request container.

use bytes::Bytes;
use hyper::{HeaderMap, Method};

/// HTTP request representation.
///
/// A simple field container; the router consults [`Request::method`] and
/// [`Request::path`], everything else is carried through untouched for
/// handlers.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	/// Request target as received, possibly including a query string.
	pub uri: String,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	/// Create a new request with the given method and target.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::new(Method::GET, "/users/42");
	/// assert_eq!(request.method, Method::GET);
	/// assert_eq!(request.path(), "/users/42");
	/// ```
	pub fn new(method: Method, uri: impl Into<String>) -> Self {
		Self {
			method,
			uri: uri.into(),
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Convenience constructor for a GET request.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::get("/");
	/// assert_eq!(request.method, Method::GET);
	/// ```
	pub fn get(uri: impl Into<String>) -> Self {
		Self::new(Method::GET, uri)
	}

	/// Convenience constructor for a POST request.
	pub fn post(uri: impl Into<String>) -> Self {
		Self::new(Method::POST, uri)
	}

	/// Attach a body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// The path component of the request target, with any query string
	/// stripped. Route matching operates on this value only.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_http::Request;
	///
	/// let request = Request::get("/search?q=aileron");
	/// assert_eq!(request.path(), "/search");
	/// ```
	pub fn path(&self) -> &str {
		match self.uri.split_once('?') {
			Some((path, _)) => path,
			None => &self.uri,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_path_without_query() {
		let request = Request::get("/users/42");
		assert_eq!(request.path(), "/users/42");
	}

	#[test]
	fn test_path_strips_query() {
		let request = Request::get("/users/42?expand=profile&page=2");
		assert_eq!(request.path(), "/users/42");
	}

	#[test]
	fn test_body_attachment() {
		let request = Request::post("/users").with_body("{\"name\":\"ada\"}");
		assert_eq!(&request.body[..], b"{\"name\":\"ada\"}");
	}
}
