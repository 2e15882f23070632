//! Query configuration module
//!
//! Describes an endpoint as data (base URL, default parameters, result root
//! key, pagination strategy) and turns caller parameters plus the active API
//! key into request URLs.

mod config;
mod builder;

pub use config::{
    PathLookup, QueryConfiguration, ELSEVIER_API_ROOT, SCOPUS_SEARCH_PATH, SERIAL_TITLE_PATH,
};
pub use builder::merge_params;
