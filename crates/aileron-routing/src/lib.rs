//! # Aileron Routing
//!
//! URL pattern compilation and ordered route matching.
//!
//! The pattern language:
//!
//! - `/literal` — matched verbatim (case sensitivity is a router option)
//! - `/@name` — named parameter, one or more non-slash characters
//! - `/@name:[0-9]+` — named parameter with a custom capture expression
//! - `(...)` — optional sub-sequence, arbitrarily nested
//! - `*` — wildcard capturing the path remainder, slashes included
//!
//! An optional leading token selects HTTP methods: `GET|POST /users`.
//!
//! Matching is stateful per request: [`Router::find_next`] returns the
//! first route past the cursor that matches, and [`Router::advance`] moves
//! the cursor past it so a handler can pass control to the next matching
//! route.
//!
//! # Examples
//!
//! ```
//! use aileron_core::Callback;
//! use aileron_http::Request;
//! use aileron_routing::Router;
//! use serde_json::json;
//!
//! let mut router = Router::new();
//! router
//!     .register("GET /users/@id", Callback::function(|_| Ok(json!("user"))), false)
//!     .unwrap();
//!
//! let request = Request::get("/users/42");
//! let matched = router.find_next(&request).unwrap();
//! assert_eq!(matched.param("id"), Some("42"));
//! ```

pub mod pattern;
pub mod route;
pub mod router;

pub use pattern::{PathMatch, PathPattern};
pub use route::{MethodSet, Route};
pub use router::{RouteMatch, Router};
