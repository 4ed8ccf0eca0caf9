//! # Aileron
//!
//! A minimal, extensible request-routing and method-dispatch framework.
//!
//! Aileron connects three small tables behind one facade:
//!
//! - a **router** of ordered `(methods, pattern, callback)` routes with a
//!   scan cursor, so a handler can *pass* a request on to the next
//!   matching route by returning `true`;
//! - a **dispatcher** of named operations, each with ordered before/after
//!   filter chains that can mutate parameters and output or short-circuit
//!   the chain;
//! - a **registry** of named service factories with shared-instance
//!   caching and post-construct hooks.
//!
//! Route patterns support named parameters (`@id`), custom parameter
//! expressions (`@id:[0-9]+`), nested optional groups
//! (`/blog(/@year(/@month))`) and a single wildcard (`/files/*`).
//!
//! ## Quick Start
//!
//! ```
//! use aileron::{Callback, Engine, Request};
//! use serde_json::json;
//!
//! let mut engine = Engine::new();
//! engine
//!     .route("GET /users/@id", Callback::function(|params| {
//!         Ok(json!({ "user": params[0] }))
//!     }))
//!     .unwrap();
//!
//! let output = engine.dispatch(&Request::get("/users/42")).unwrap();
//! assert_eq!(output, json!({ "user": "42" }));
//! ```

pub mod engine;

pub use engine::Engine;

pub use aileron_core::{Callback, Error, HandlerFn, Params, Result, Service};
pub use aileron_dispatch::{Dispatcher, Filter, FilterFlow, FilterPhase};
pub use aileron_http::{Request, Response};
pub use aileron_registry::Registry;
pub use aileron_routing::{MethodSet, PathMatch, PathPattern, Route, RouteMatch, Router};

/// Commonly used imports for applications built on the framework.
pub mod prelude {
	pub use crate::engine::Engine;
	pub use aileron_core::{Callback, Error, Params, Result, Service};
	pub use aileron_dispatch::{FilterFlow, FilterPhase};
	pub use aileron_http::{Request, Response};
}
