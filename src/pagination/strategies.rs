//! Pagination strategy implementations
//!
//! Dispatch is a `match` on [`PaginationStrategy`]; each arm handles one
//! upstream pagination pattern.

use super::types::{NextPage, PaginationState, PaginationStrategy};
use crate::decode::find_link;
use crate::types::QueryParameters;
use serde_json::Value;
use url::Url;

/// Deep-paging ceiling enforced by the upstream search API
pub const DEFAULT_MAX_OFFSET: u32 = 10_000;

impl PaginationStrategy {
    /// Decide what follows a successful page
    ///
    /// `root` is the object under the result root key, `None` when the body
    /// lacked it. `params` are the merged parameters the query was built from.
    pub fn next_page(
        &self,
        root: Option<&Value>,
        records_count: usize,
        params: &QueryParameters,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(records_count);

        match self {
            Self::None => NextPage::Done,
            Self::LinkBased { rel } => link_based(root, rel),
            Self::OffsetCapped {
                offset_param,
                size_param,
                max_offset,
                ..
            } => {
                // page_size is always Some for OffsetCapped
                let page_size = self.page_size(params).unwrap_or(1);
                offset_capped(
                    root,
                    records_count,
                    page_size,
                    offset_param,
                    size_param,
                    *max_offset,
                    state,
                )
            }
        }
    }
}

// ============================================================================
// Link-based
// ============================================================================

fn link_based(root: Option<&Value>, rel: &str) -> NextPage {
    match root.and_then(|r| find_link(r, rel)) {
        Some(href) => NextPage::with_url(href),
        None => NextPage::Done,
    }
}

// ============================================================================
// Offset-capped
// ============================================================================

fn offset_capped(
    root: Option<&Value>,
    records_count: usize,
    page_size: u32,
    offset_param: &str,
    size_param: &str,
    max_offset: u32,
    state: &mut PaginationState,
) -> NextPage {
    let Some(root) = root else {
        return NextPage::Done;
    };

    // A short page is the last one
    if records_count < page_size as usize {
        return NextPage::Done;
    }

    let (start, count) = current_window(root, offset_param, size_param)
        .unwrap_or((state.offset, page_size));
    let count = if count == 0 { page_size } else { count };
    let next_offset = start.saturating_add(count);

    if next_offset >= max_offset {
        return NextPage::Done;
    }

    state.set_offset(next_offset);
    NextPage::with_param(offset_param, next_offset.to_string())
}

/// Read the current `(offset, page size)` window from a response root
///
/// Prefers the query string of the `self` link, then the OpenSearch
/// `startIndex`/`itemsPerPage` fields.
pub fn current_window(root: &Value, offset_param: &str, size_param: &str) -> Option<(u32, u32)> {
    window_from_self_link(root, offset_param, size_param).or_else(|| window_from_opensearch(root))
}

fn window_from_self_link(root: &Value, offset_param: &str, size_param: &str) -> Option<(u32, u32)> {
    let href = find_link(root, "self")?;
    let url = Url::parse(&href).ok()?;

    let mut start = None;
    let mut count = None;
    for (key, value) in url.query_pairs() {
        if key == offset_param {
            start = value.parse::<u32>().ok();
        } else if key == size_param {
            count = value.parse::<u32>().ok();
        }
    }

    // A self link without a start parameter is the first page
    Some((start.unwrap_or(0), count?))
}

fn window_from_opensearch(root: &Value) -> Option<(u32, u32)> {
    let start = numeric_field(root.get("opensearch:startIndex")?)?;
    let count = numeric_field(root.get("opensearch:itemsPerPage")?)?;
    Some((start, count))
}

/// The upstream sends numbers as strings; accept both
fn numeric_field(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}
