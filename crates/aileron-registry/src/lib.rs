//! # Aileron Registry
//!
//! Named factory table for lazily-constructed [`Service`] instances.
//!
//! Each entry carries a factory, the positional constructor parameters it
//! is invoked with, and an optional post-construct hook. Resolution is
//! either *shared* (construct once, cache, hand out the same `Arc`) or
//! *fresh* (construct on every resolution, re-running the hook each time).
//!
//! # Examples
//!
//! ```
//! use aileron_core::Service;
//! use aileron_registry::Registry;
//! use serde_json::json;
//! use std::any::Any;
//! use std::sync::Arc;
//!
//! struct Connection {
//!     dsn: String,
//! }
//!
//! impl Service for Connection {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let registry = Registry::new();
//! registry.register("db", |params| {
//!     Ok(Arc::new(Connection {
//!         dsn: params[0].as_str().unwrap_or_default().to_owned(),
//!     }))
//! }, vec![json!("sqlite://app.db")]);
//!
//! let db = registry.resolve("db", true).unwrap();
//! let conn = db.as_any().downcast_ref::<Connection>().unwrap();
//! assert_eq!(conn.dsn, "sqlite://app.db");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use aileron_core::{Error, Params, Result, Service};
use serde_json::Value;
use tracing::debug;

/// Constructs a service instance from positional parameters.
pub type Factory = Arc<dyn Fn(&[Value]) -> Result<Arc<dyn Service>> + Send + Sync>;

/// Runs once per construction, after the factory returns.
pub type ConstructHook = Arc<dyn Fn(&Arc<dyn Service>) + Send + Sync>;

struct Entry {
	factory: Factory,
	params: Params,
	hook: Option<ConstructHook>,
	shared: Option<Arc<dyn Service>>,
}

/// Name-to-factory table with shared-instance caching.
///
/// Interior mutability lets shared instances be resolved through `&self`;
/// a poisoned lock is recovered rather than propagated since the table
/// holds no invariants a panicked writer could have broken mid-update.
#[derive(Default)]
pub struct Registry {
	entries: RwLock<HashMap<String, Entry>>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a factory under a name. A prior entry under the same name
	/// is replaced and its cached shared instance dropped.
	pub fn register<F>(&self, name: impl Into<String>, factory: F, params: Params)
	where
		F: Fn(&[Value]) -> Result<Arc<dyn Service>> + Send + Sync + 'static,
	{
		self.insert(name.into(), Arc::new(factory), params, None);
	}

	/// Register a factory together with a post-construct hook. The hook
	/// runs after every construction: once ever for a shared entry, once
	/// per resolution for fresh ones.
	pub fn register_with_hook<F, H>(
		&self,
		name: impl Into<String>,
		factory: F,
		params: Params,
		hook: H,
	) where
		F: Fn(&[Value]) -> Result<Arc<dyn Service>> + Send + Sync + 'static,
		H: Fn(&Arc<dyn Service>) + Send + Sync + 'static,
	{
		self.insert(name.into(), Arc::new(factory), params, Some(Arc::new(hook)));
	}

	fn insert(&self, name: String, factory: Factory, params: Params, hook: Option<ConstructHook>) {
		debug!(entry = %name, "registry entry registered");
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.insert(
			name,
			Entry {
				factory,
				params,
				hook,
				shared: None,
			},
		);
	}

	/// Resolve a named entry.
	///
	/// With `shared` the first resolution constructs, runs the hook and
	/// caches; later resolutions return the cached instance untouched.
	/// Without it every resolution constructs a new instance and re-runs
	/// the hook.
	pub fn resolve(&self, name: &str, shared: bool) -> Result<Arc<dyn Service>> {
		if shared {
			let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
			if let Some(instance) = entries.get(name).and_then(|e| e.shared.clone()) {
				return Ok(instance);
			}
		}

		// Construct outside the write lock so a factory resolving other
		// entries cannot deadlock against this one.
		let (factory, params, hook) = {
			let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
			let entry = entries.get(name).ok_or_else(|| {
				Error::ImproperlyConfigured(format!("`{}` is not a registered entry", name))
			})?;
			(entry.factory.clone(), entry.params.clone(), entry.hook.clone())
		};

		let instance = factory(&params)?;
		if let Some(hook) = hook {
			hook(&instance);
		}
		debug!(entry = %name, shared, "registry entry constructed");

		if shared {
			let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
			if let Some(entry) = entries.get_mut(name) {
				// A re-register between the read and this write wins.
				if entry.shared.is_none() {
					entry.shared = Some(instance.clone());
				}
			}
		}

		Ok(instance)
	}

	/// Whether a factory is registered under this name.
	pub fn has(&self, name: &str) -> bool {
		let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
		entries.contains_key(name)
	}

	/// Registered entry names, sorted.
	pub fn names(&self) -> Vec<String> {
		let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
		let mut names: Vec<String> = entries.keys().cloned().collect();
		names.sort();
		names
	}

	/// Drop every entry and cached instance.
	pub fn reset(&self) {
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.clear();
	}
}
