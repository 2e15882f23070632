// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # scopus-query
//!
//! Client-side query engine for the Scopus bibliographic search API.
//!
//! ## Features
//!
//! - **Lazy pagination**: Records are pulled one at a time; pages are fetched
//!   only when the buffer runs dry
//! - **Key rotation**: A rejected key (HTTP 429/401) is replaced by the next
//!   one in the ring, with a single retry per fetch
//! - **Pagination strategies**: `next` links, single page, or `start` offsets
//!   capped at the 10,000-record deep-paging limit
//! - **Serial title lookups**: ISSN lookups are moved into the URL path
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scopus_query::{params, Next, QueryEngine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut engine = QueryEngine::scopus_search(
//!         vec!["first-key", "second-key"],
//!         params([("query", "TITLE(graphene) AND PUBYEAR > 2020")]),
//!     )?;
//!
//!     loop {
//!         match engine.next().await? {
//!             Next::End => break,
//!             next => println!("{}", next.record().unwrap_or_default()),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      QueryEngine                         │
//! │  next() → Record | Paired | End     into_stream()        │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────┬────────────┬───┴──────────┬─────────────────┐
//! │   Query   │    Auth    │  Pagination  │      HTTP       │
//! ├───────────┼────────────┼──────────────┼─────────────────┤
//! │ Endpoints │ Key ring   │ Link-based   │ Transport trait │
//! │ URL build │ Rotation   │ None         │ reqwest         │
//! │ ISSN path │ Masking    │ Offset-capped│ Rate limit      │
//! └───────────┴────────────┴──────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API keys and the rotating key ring
pub mod auth;

/// HTTP transport with rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Response body decoding
pub mod decode;

/// Endpoint configurations and URL building
pub mod query;

/// Paginated query engine
pub mod engine;

/// Client configuration files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{Credentials, KeyRing};
pub use config::ClientConfig;
pub use engine::{EngineState, Next, QueryEngine, QueryStats};
pub use http::{HttpTransport, Transport, TransportResponse};
pub use pagination::PaginationStrategy;
pub use query::QueryConfiguration;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
