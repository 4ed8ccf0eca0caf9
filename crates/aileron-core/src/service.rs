//! The callable model: services, handler functions and the [`Callback`]
//! variant the dispatcher invokes.
//!
//! The original design this replaces detected callables dynamically at
//! invocation time. Here every route callback and mapped operation is one
//! of three explicit cases, each carrying exactly the data needed to
//! invoke it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::exception::{Error, Result};

/// Positional parameter list passed to callbacks and filters.
pub type Params = Vec<Value>;

/// A plain function or closure callback.
pub type HandlerFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A named component that the registry can construct and the dispatcher
/// can invoke methods on.
///
/// `call` dispatches on a method name; the default implementation rejects
/// every method, so components that are plain shared resources (a pooled
/// connection, a template engine) only implement `as_any` and are reached
/// through typed downcasts instead.
///
/// # Examples
///
/// ```
/// use aileron_core::{Result, Service};
/// use serde_json::{Value, json};
/// use std::any::Any;
///
/// struct Greeter;
///
/// impl Service for Greeter {
///     fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
///         match method {
///             "hello" => Ok(json!(format!("hello {}", params[0].as_str().unwrap_or("world")))),
///             other => Err(aileron_core::Error::ImproperlyConfigured(format!(
///                 "Greeter has no method `{}`",
///                 other
///             ))),
///         }
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let greeter = Greeter;
/// assert_eq!(greeter.call("hello", &[json!("ada")]).unwrap(), json!("hello ada"));
/// ```
pub trait Service: Send + Sync {
	/// Invoke a named method with positional parameters.
	fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
		let _ = params;
		Err(Error::ImproperlyConfigured(format!(
			"service does not expose a callable method `{}`",
			method
		)))
	}

	/// Typed access to the underlying component.
	fn as_any(&self) -> &dyn Any;
}

/// Something invokable: a free function, a bound service method, or a
/// method on a registry entry that is resolved at call time.
#[derive(Clone)]
pub enum Callback {
	/// A free function or closure.
	Function(Arc<HandlerFn>),
	/// A method on an already-constructed service instance.
	Method {
		service: Arc<dyn Service>,
		method: String,
	},
	/// A method on a registry entry named `service`. Must be resolved to
	/// a [`Callback::Method`] through the registry before execution.
	Registered { service: String, method: String },
}

impl Callback {
	/// Wrap a closure as a callback.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_core::Callback;
	/// use serde_json::json;
	///
	/// let cb = Callback::function(|_params| Ok(json!("ok")));
	/// assert!(matches!(cb, Callback::Function(_)));
	/// ```
	pub fn function<F>(f: F) -> Self
	where
		F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
	{
		Self::Function(Arc::new(f))
	}

	/// Bind a method on an existing service instance.
	pub fn method(service: Arc<dyn Service>, method: impl Into<String>) -> Self {
		Self::Method {
			service,
			method: method.into(),
		}
	}

	/// Reference a method on a registry entry by name; resolution is
	/// deferred to call time.
	pub fn registered(service: impl Into<String>, method: impl Into<String>) -> Self {
		Self::Registered {
			service: service.into(),
			method: method.into(),
		}
	}
}

impl fmt::Debug for Callback {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Callback::Function(_) => f.write_str("Callback::Function"),
			Callback::Method { method, .. } => write!(f, "Callback::Method({})", method),
			Callback::Registered { service, method } => {
				write!(f, "Callback::Registered({}.{})", service, method)
			}
		}
	}
}
