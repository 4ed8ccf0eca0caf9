//! # Aileron Core
//!
//! Shared foundation for the Aileron framework: the error taxonomy, the
//! [`Service`] trait that registry-backed components implement, and the
//! [`Callback`] variant that models everything the dispatcher can invoke.
//!
//! This crate has no dependency on the other framework crates; routing,
//! dispatch and the instance registry all build on the seams defined here.

pub mod exception;
pub mod service;

pub use exception::{Error, Result};
pub use service::{Callback, HandlerFn, Params, Service};
