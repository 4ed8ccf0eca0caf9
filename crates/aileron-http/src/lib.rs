//! # Aileron HTTP
//!
//! Plain request/response value objects. These are deliberately thin field
//! containers: the routing and dispatch core only reads the method and the
//! path, and the engine only writes a status, headers and a body. Server
//! plumbing (listening, reading sockets, TLS) lives outside the framework.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
