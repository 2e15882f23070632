//! Engine types
//!
//! The pull result, observable engine state, page buffer and statistics.

use crate::types::Record;

/// Result of one pull on the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Next {
    /// The next record
    Record(Record),
    /// The next record with the API key its page was fetched under
    Paired {
        /// The record
        record: Record,
        /// Key active when the page was fetched
        api_key: String,
    },
    /// The sequence is over; further pulls return this again
    End,
}

impl Next {
    /// Check if this is the end of the sequence
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// The record, if any
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) | Self::Paired { record, .. } => Some(record),
            Self::End => None,
        }
    }

    /// The paired key, if any
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Self::Paired { api_key, .. } => Some(api_key),
            _ => None,
        }
    }

    /// Consume into the record
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record(record) | Self::Paired { record, .. } => Some(record),
            Self::End => None,
        }
    }
}

/// Observable state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing fetched yet, or the last request was rejected
    Empty,
    /// Buffered records remain
    HasData,
    /// Buffer consumed, a next page is known
    ExhaustedPage,
    /// Terminal; pulls return [`Next::End`]
    Done,
    /// Terminal; pulls return [`Error::Halted`](crate::Error::Halted)
    Failed,
}

/// The current page and the read position in it
///
/// Invariant: `cursor <= entries.len()`.
#[derive(Debug, Clone, Default)]
pub struct PageBuffer {
    entries: Vec<Record>,
    cursor: usize,
    api_key: Option<String>,
}

impl PageBuffer {
    /// Replace the buffer with a fresh page fetched under `api_key`
    pub fn reset(&mut self, entries: Vec<Record>, api_key: String) {
        self.entries = entries;
        self.cursor = 0;
        self.api_key = Some(api_key);
    }

    /// Take the record at the cursor and advance
    pub fn take_next(&mut self) -> Option<Record> {
        let record = self.entries.get_mut(self.cursor).map(std::mem::take)?;
        self.cursor += 1;
        Some(record)
    }

    /// Records left to read
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Key the buffered page was fetched under
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// Statistics from a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Requests sent, including rejected ones
    pub requests: usize,
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Records handed to the caller
    pub records_yielded: usize,
    /// 429/401 responses received
    pub rejections: usize,
    /// Key rotations performed
    pub rotations: usize,
}

impl QueryStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }
}
