//! # Aileron Dispatch
//!
//! The invocation engine: a name-to-callable table where every named
//! operation carries ordered before/after filter chains with short-circuit
//! semantics.
//!
//! Filters receive the pending parameter list and the pending output, may
//! mutate either, and return [`FilterFlow::Stop`] to truncate the chain.
//! A stop in a before filter aborts the remaining before filters, the
//! target, and all after filters; a stop in an after filter truncates
//! only the remaining after filters.
//!
//! # Examples
//!
//! ```
//! use aileron_core::Callback;
//! use aileron_dispatch::{Dispatcher, FilterFlow, FilterPhase};
//! use serde_json::{Value, json};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.set("greet", Callback::function(|params| {
//!     Ok(json!(format!("hello {}", params[0].as_str().unwrap_or("?"))))
//! }));
//! dispatcher.hook("greet", FilterPhase::Before, |params, _output| {
//!     params[0] = json!("world");
//!     FilterFlow::Continue
//! });
//!
//! let output = dispatcher.run("greet", vec![json!("ignored")]).unwrap();
//! assert_eq!(output, json!("hello world"));
//! ```

pub mod dispatcher;
pub mod filter;

pub use dispatcher::Dispatcher;
pub use filter::{Filter, FilterFlow, FilterPhase};
