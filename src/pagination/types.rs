//! Pagination types
//!
//! Defines the strategy configuration, the continuation state machine value,
//! and the per-fetch pagination decision.

use crate::types::QueryParameters;

/// Where the next page comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Continuation {
    /// No request issued yet (or the last one was rejected)
    #[default]
    NotStarted,
    /// Fully formed URL of the next page
    NextUrl(String),
    /// Terminal; no further requests
    Done,
}

impl Continuation {
    /// Check if this is the terminal state
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The stored next URL, if any
    pub fn next_url(&self) -> Option<&str> {
        match self {
            Self::NextUrl(url) => Some(url),
            _ => None,
        }
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available
    Continue {
        /// Parameters to add on top of the caller's when rebuilding the URL
        query_params: QueryParameters,
        /// Ready-made URL supplied by the upstream
        url: Option<String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = QueryParameters::new();
        params.insert(key.into(), value.into());
        Self::Continue {
            query_params: params,
            url: None,
        }
    }

    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue {
            query_params: QueryParameters::new(),
            url: Some(url.into()),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Pagination strategy of an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaginationStrategy {
    /// Single-page endpoint
    #[default]
    None,

    /// Follow the `link` entry whose `@ref` equals `rel`
    LinkBased {
        /// Relation to follow (usually "next")
        rel: String,
    },

    /// Advance an explicit offset parameter until a hard ceiling
    OffsetCapped {
        /// Query parameter carrying the offset (e.g. "start")
        offset_param: String,
        /// Query parameter carrying the page size (e.g. "count")
        size_param: String,
        /// Page size when the parameters do not set one
        default_page_size: u32,
        /// Offsets at or beyond this are never requested
        max_offset: u32,
    },
}

impl PaginationStrategy {
    /// Link-based pagination following the "next" relation
    pub fn link_based() -> Self {
        Self::LinkBased {
            rel: "next".to_string(),
        }
    }

    /// Offset pagination over `start`/`count` capped at `max_offset`
    pub fn offset_capped(default_page_size: u32, max_offset: u32) -> Self {
        Self::OffsetCapped {
            offset_param: "start".to_string(),
            size_param: "count".to_string(),
            default_page_size,
            max_offset,
        }
    }

    /// Page size requested by `params` for offset pagination
    ///
    /// Falls back to the configured default when the parameter is absent or
    /// not a positive integer. Other strategies have no page size.
    pub fn page_size(&self, params: &QueryParameters) -> Option<u32> {
        match self {
            Self::OffsetCapped {
                size_param,
                default_page_size,
                ..
            } => Some(
                params
                    .get(size_param)
                    .and_then(|v| v.trim().parse::<u32>().ok())
                    .filter(|size| *size > 0)
                    .unwrap_or(*default_page_size),
            ),
            _ => None,
        }
    }

    /// Offset the caller's parameters start from (0 when unset)
    pub fn initial_offset(&self, params: &QueryParameters) -> u32 {
        match self {
            Self::OffsetCapped { offset_param, .. } => params
                .get(offset_param)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// Tracks pagination progress during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched successfully
    pub pages: u32,
    /// Offset of the page most recently requested
    pub offset: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Move to a new offset
    pub fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }

    /// Forget progress, e.g. after a rejected request
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
