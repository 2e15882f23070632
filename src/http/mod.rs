//! HTTP transport module
//!
//! The engine talks to the upstream only through the [`Transport`] trait.
//! [`HttpTransport`] is the production implementation on reqwest.
//!
//! # Features
//!
//! - **Plain status passthrough**: 429/401 come back as statuses; the engine
//!   decides what a rejection means
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Per-request timeout**: Supplied by the caller on every request

mod client;
mod rate_limit;

pub use client::{redact_url, HttpTransport, HttpTransportConfig, Transport, TransportResponse};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
