//! HTTP response container.

use aileron_core::Result;
use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new response with the given status code.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a response with HTTP 200 OK status.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Create a response with HTTP 204 No Content status.
	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	/// Create a response with HTTP 404 Not Found status.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::not_found();
	/// assert_eq!(response.status, StatusCode::NOT_FOUND);
	/// ```
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// Create a response with HTTP 500 Internal Server Error status.
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Set the body as plain text.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_http::Response;
	///
	/// let response = Response::ok().with_body("hello");
	/// assert_eq!(&response.body[..], b"hello");
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		if !self.headers.contains_key(CONTENT_TYPE) {
			self.headers.insert(
				CONTENT_TYPE,
				HeaderValue::from_static("text/plain; charset=utf-8"),
			);
		}
		self
	}

	/// Serialize a value as the JSON body.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_http::Response;
	/// use serde_json::json;
	///
	/// let response = Response::ok().with_json(&json!({"status": "ok"})).unwrap();
	/// assert_eq!(&response.body[..], br#"{"status":"ok"}"#);
	/// ```
	pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self> {
		let body = serde_json::to_vec(value).map_err(anyhow::Error::from)?;
		self.body = Bytes::from(body);
		self.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		Ok(self)
	}
}
