//! Pagination module
//!
//! Supports: Link-based (`next` relation in the body), None (single page),
//! Offset-capped (`start` offset with a hard ceiling on deep paging)
//!
//! # Overview
//!
//! The strategy is plain data on the query configuration. After each
//! successful fetch the engine asks the strategy for the [`NextPage`], then
//! stores the resulting [`Continuation`].

mod strategies;
mod types;

pub use strategies::{current_window, DEFAULT_MAX_OFFSET};
pub use types::{Continuation, NextPage, PaginationState, PaginationStrategy};

#[cfg(test)]
mod tests;
