//! Endpoint configurations

use crate::pagination::{PaginationStrategy, DEFAULT_MAX_OFFSET};
use crate::types::{params, QueryParameters};

/// Host of the Elsevier content APIs
pub const ELSEVIER_API_ROOT: &str = "https://api.elsevier.com";

/// Path of the Scopus search endpoint
pub const SCOPUS_SEARCH_PATH: &str = "/content/search/scopus";

/// Path of the serial title endpoint
pub const SERIAL_TITLE_PATH: &str = "/content/serial/title";

/// Moves an identifying parameter into the URL path
///
/// With `field = "issn"` and `segment = "issn"`, `?issn=1234-5678` becomes
/// `/issn/1234-5678` and every `conflicting` parameter is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLookup {
    /// Parameter holding the identifier
    pub field: String,
    /// Path segment placed before the identifier
    pub segment: String,
    /// Parameters that select a different lookup mode
    pub conflicting: Vec<String>,
}

/// Immutable description of one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfiguration {
    /// Endpoint URL without query string
    pub base_url: String,
    /// Parameters sent unless the caller overrides them
    pub default_params: QueryParameters,
    /// JSON key the results are nested under
    pub result_root_key: String,
    /// Query parameter carrying the API key
    pub key_param: String,
    /// How the next page is found
    pub pagination: PaginationStrategy,
    /// Identifier-in-path lookup, for single-record endpoints
    pub path_lookup: Option<PathLookup>,
    /// A 200 body without the result root is malformed
    pub strict: bool,
}

impl QueryConfiguration {
    /// Scopus search, following `next` links
    pub fn scopus_search() -> Self {
        Self {
            base_url: format!("{ELSEVIER_API_ROOT}{SCOPUS_SEARCH_PATH}"),
            default_params: params([
                ("count", "100"),
                ("view", "COMPLETE"),
                ("httpAccept", "application/json"),
            ]),
            result_root_key: "search-results".to_string(),
            key_param: "apiKey".to_string(),
            pagination: PaginationStrategy::link_based(),
            path_lookup: None,
            strict: false,
        }
    }

    /// Scopus search paged by explicit `start` offsets, capped at 10,000
    pub fn scopus_offset_search() -> Self {
        Self {
            default_params: params([
                ("count", "200"),
                ("view", "STANDARD"),
                ("httpAccept", "application/json"),
            ]),
            pagination: PaginationStrategy::offset_capped(200, DEFAULT_MAX_OFFSET),
            ..Self::scopus_search()
        }
    }

    /// Serial title metadata; single page, ISSN lookups go in the path
    pub fn serial_title() -> Self {
        Self {
            base_url: format!("{ELSEVIER_API_ROOT}{SERIAL_TITLE_PATH}"),
            default_params: params([
                ("count", "100"),
                ("view", "CITESCORE"),
                ("httpAccept", "application/json"),
            ]),
            result_root_key: "serial-metadata-response".to_string(),
            key_param: "apiKey".to_string(),
            pagination: PaginationStrategy::None,
            path_lookup: Some(PathLookup {
                field: "issn".to_string(),
                segment: "issn".to_string(),
                conflicting: vec!["title".to_string()],
            }),
            strict: true,
        }
    }

    /// Replace the endpoint URL, e.g. to point at a proxy
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the host while keeping the endpoint path
    #[must_use]
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        if let Some(path) = self.base_url.strip_prefix(ELSEVIER_API_ROOT) {
            self.base_url = format!("{}{path}", api_root.trim_end_matches('/'));
        }
        self
    }

    /// Set or replace a default parameter
    #[must_use]
    pub fn with_default_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_params.insert(key.into(), value.into());
        self
    }

    /// Replace the pagination strategy
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationStrategy) -> Self {
        self.pagination = pagination;
        self
    }
}
