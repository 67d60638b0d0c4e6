//! API gateway for the freight marketplace backend.
//!
//! Provides the HTTP client with auth header injection, the normalized result
//! envelope, request types, and typed wrappers for each backend endpoint.

pub mod auth;
pub mod bids;
pub mod client;
pub mod dev;
pub mod envelope;
pub mod shipments;
pub mod types;


pub use client::{ApiClient, RequestOptions};
pub use envelope::{ApiError, ApiResult, Envelope};
