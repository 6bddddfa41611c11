//! # Result Client
//!
//! Request/response access to the course results server. Every call resolves to
//! either a typed, normalized snapshot from [`util::models`] or a single
//! [`FetchError`]; callers never see HTTP status codes or raw JSON.
//!
//! - [`endpoints`]: routes, methods and parameter names as the server expects them.
//! - [`wire`]: the server's JSON shapes and their normalization into domain types.
//! - [`client`]: the `reqwest`-backed transport.
//! - [`source`]: the [`ResultSource`] seam the presenter depends on.
//!
//! Requests are unary. There is no retry, no cancellation and no timeout beyond
//! what the transport itself enforces.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod source;
pub mod wire;

pub use client::HttpResultClient;
pub use endpoints::{Endpoint, Request};
pub use error::{FetchError, FetchErrorKind};
pub use source::ResultSource;
