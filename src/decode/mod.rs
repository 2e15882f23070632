//! Response decoder module
//!
//! Pulls result entries, pagination links and error descriptors out of the
//! upstream's JSON bodies.
//!
//! # Overview
//!
//! A results page looks like
//!
//! ```text
//! { "<root key>": { "entry": [ ... ], "link": [ {"@ref": "next", "@href": "..."} ] } }
//! ```
//!
//! and an error body like
//!
//! ```text
//! { "service-error": { "status": { "statusCode": "...", "statusText": "..." } } }
//! ```

mod decoders;
mod types;

pub use decoders::{error_message, extract_entries, find_link, parse_body, PageDecoder};
pub use types::{DecodedPage, ErrorBody, ErrorResponse, ServiceError, ServiceStatus};

#[cfg(test)]
mod tests;
