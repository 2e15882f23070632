//! Paginated query engine
//!
//! Ties a [`QueryConfiguration`], a [`KeyRing`] and a [`Transport`] together
//! into a lazy, pull-based sequence of records.
//!
//! # Overview
//!
//! - [`QueryEngine::next`] hands out buffered records and fetches the next
//!   page when the buffer runs dry.
//! - A 429 or 401 response clears the continuation, rotates to the next key
//!   and retries exactly once. A second rejection surfaces as
//!   [`Error::QuotaExhausted`].
//! - End of the result set is [`Next::End`], never an error.
//!
//! ```rust,ignore
//! use scopus_query::{params, QueryEngine, Next};
//!
//! let mut engine = QueryEngine::scopus_search(vec!["key-a", "key-b"], params([("query", "TITLE(rust)")]))?;
//! while let Next::Record(record) = engine.next().await? {
//!     println!("{}", record["dc:title"]);
//! }
//! ```

mod types;

pub use types::{EngineState, Next, PageBuffer, QueryStats};

use crate::auth::{mask_key, Credentials, KeyRing};
use crate::decode::{error_message, PageDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, Transport};
use crate::pagination::{Continuation, NextPage, PaginationState};
use crate::query::QueryConfiguration;
use crate::types::{QueryParameters, Record};
use futures::Stream;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How a response status is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseClass {
    Success,
    /// Quota exceeded or key invalid; recoverable by rotation
    Rejected,
    Failed,
}

impl ResponseClass {
    fn of(status: u16) -> Self {
        match status {
            200 => Self::Success,
            401 | 429 => Self::Rejected,
            _ => Self::Failed,
        }
    }
}

/// Stateful iterator over a paginated, key-authenticated query
///
/// Not meant to be shared: every operation takes `&mut self`.
pub struct QueryEngine<T: Transport = HttpTransport> {
    transport: T,
    configuration: QueryConfiguration,
    keys: KeyRing,
    params: QueryParameters,
    timeout: Duration,
    pair_with_key: bool,
    decoder: PageDecoder,
    continuation: Continuation,
    buffer: PageBuffer,
    pagination: PaginationState,
    failed: bool,
    stats: QueryStats,
}

impl QueryEngine<HttpTransport> {
    /// Scopus search over HTTP with default transport settings
    pub fn scopus_search(
        credentials: impl Into<Credentials>,
        params: QueryParameters,
    ) -> Result<Self> {
        Self::new(
            HttpTransport::new()?,
            QueryConfiguration::scopus_search(),
            credentials,
            params,
        )
    }

    /// Serial title lookup over HTTP with default transport settings
    pub fn serial_title(
        credentials: impl Into<Credentials>,
        params: QueryParameters,
    ) -> Result<Self> {
        Self::new(
            HttpTransport::new()?,
            QueryConfiguration::serial_title(),
            credentials,
            params,
        )
    }
}

impl<T: Transport> QueryEngine<T> {
    /// Create an engine; nothing is fetched until the first pull
    pub fn new(
        transport: T,
        configuration: QueryConfiguration,
        credentials: impl Into<Credentials>,
        params: QueryParameters,
    ) -> Result<Self> {
        let keys = KeyRing::from_credentials(credentials.into())?;
        let decoder =
            PageDecoder::new(configuration.result_root_key.clone()).strict(configuration.strict);

        Ok(Self {
            transport,
            configuration,
            keys,
            params,
            timeout: DEFAULT_TIMEOUT,
            pair_with_key: false,
            decoder,
            continuation: Continuation::NotStarted,
            buffer: PageBuffer::default(),
            pagination: PaginationState::new(),
            failed: false,
            stats: QueryStats::new(),
        })
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Yield [`Next::Paired`] instead of [`Next::Record`]
    #[must_use]
    pub fn with_pair_with_key(mut self, pair: bool) -> Self {
        self.pair_with_key = pair;
        self
    }

    /// Endpoint configuration
    pub fn configuration(&self) -> &QueryConfiguration {
        &self.configuration
    }

    /// Key ring, for inspecting the active key
    pub fn keys(&self) -> &KeyRing {
        &self.keys
    }

    /// Where the next page comes from
    pub fn continuation(&self) -> &Continuation {
        &self.continuation
    }

    /// Get statistics
    pub fn stats(&self) -> &QueryStats {
        &self.stats
    }

    /// Current state of the engine
    pub fn state(&self) -> EngineState {
        if self.failed {
            EngineState::Failed
        } else if self.buffer.remaining() > 0 {
            EngineState::HasData
        } else {
            match self.continuation {
                Continuation::NotStarted => EngineState::Empty,
                Continuation::NextUrl(_) => EngineState::ExhaustedPage,
                Continuation::Done => EngineState::Done,
            }
        }
    }

    /// Pull the next record
    ///
    /// Returns [`Next::End`] once the result set is exhausted, and keeps
    /// returning it without issuing requests. After an unrecoverable error
    /// every pull fails with [`Error::Halted`].
    pub async fn next(&mut self) -> Result<Next> {
        if self.failed {
            return Err(Error::Halted);
        }

        loop {
            if let Some(record) = self.buffer.take_next() {
                self.stats.records_yielded += 1;
                return Ok(self.wrap(record));
            }

            if self.continuation.is_done() {
                return Ok(Next::End);
            }

            let (entries, api_key) = match self.fetch_page().await {
                Ok(page) => page,
                Err(e) => {
                    if self.halts_on(&e) {
                        warn!("Query halted: {e}");
                        self.failed = true;
                    }
                    return Err(e);
                }
            };

            if entries.is_empty() {
                self.continuation = Continuation::Done;
                return Ok(Next::End);
            }
            self.buffer.reset(entries, api_key);
        }
    }

    /// Drain up to `limit` records (all of them when `None`)
    pub async fn collect_all(&mut self, limit: Option<usize>) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while limit.map_or(true, |max| records.len() < max) {
            match self.next().await? {
                Next::End => break,
                next => records.extend(next.into_record()),
            }
        }
        Ok(records)
    }

    /// The pull sequence as a stream
    ///
    /// Ends at end-of-sequence; an error is yielded once and ends the stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<Next>> {
        futures::stream::try_unfold(self, |mut engine| async move {
            let next = engine.next().await?;
            Ok::<_, Error>(match next {
                Next::End => None,
                next => Some((next, engine)),
            })
        })
    }

    fn wrap(&self, record: Record) -> Next {
        if self.pair_with_key {
            let api_key = self
                .buffer
                .api_key()
                .unwrap_or_else(|| self.keys.current())
                .to_string();
            Next::Paired { record, api_key }
        } else {
            Next::Record(record)
        }
    }

    /// A rejected retry leaves the engine usable while untried keys remain
    fn halts_on(&self, error: &Error) -> bool {
        error.is_fatal() || self.keys.remaining() == 0
    }

    /// Fetch one page, rotating keys at most once
    async fn fetch_page(&mut self) -> Result<(Vec<Record>, String)> {
        let mut attempt_is_final = false;

        loop {
            let url = self.request_url()?;
            let api_key = self.keys.current().to_string();

            self.stats.requests += 1;
            let response = self.transport.execute(&url, self.timeout).await?;

            match ResponseClass::of(response.status) {
                ResponseClass::Success => {
                    let entries = self.accept_page(&response.body, &url, &api_key)?;
                    return Ok((entries, api_key));
                }
                ResponseClass::Rejected => {
                    self.stats.rejections += 1;
                    warn!(
                        "Request rejected with HTTP {} under key {}",
                        response.status,
                        mask_key(&api_key)
                    );

                    // A known next link may belong to the rejected key
                    self.continuation = Continuation::NotStarted;
                    self.pagination.reset();

                    if attempt_is_final {
                        return Err(Error::quota_exhausted(format!(
                            "retry under rotated key rejected with HTTP {}: {}",
                            response.status,
                            error_message(&response.body)
                        )));
                    }

                    self.keys.rotate().map_err(|e| {
                        Error::quota_exhausted(format!(
                            "HTTP {} and no key left to rotate to ({e})",
                            response.status
                        ))
                    })?;
                    self.stats.rotations += 1;
                    attempt_is_final = true;
                }
                ResponseClass::Failed => {
                    return Err(Error::upstream(
                        response.status,
                        error_message(&response.body),
                    ));
                }
            }
        }
    }

    fn request_url(&mut self) -> Result<String> {
        match &self.continuation {
            Continuation::NextUrl(url) => Ok(url.clone()),
            Continuation::NotStarted => {
                let merged = self.configuration.merged_params(&self.params);
                let offset = self.configuration.pagination.initial_offset(&merged);
                self.pagination.set_offset(offset);
                self.configuration
                    .build_url(&self.params, self.keys.current(), &QueryParameters::new())
            }
            Continuation::Done => Err(Error::Other("no further pages to fetch".to_string())),
        }
    }

    /// Decode a 200 body and store the continuation it implies
    fn accept_page(
        &mut self,
        body: &str,
        request_url: &str,
        api_key: &str,
    ) -> Result<Vec<Record>> {
        let page = self.decoder.decode(body)?;
        let merged = self.configuration.merged_params(&self.params);

        let next = self.configuration.pagination.next_page(
            page.root.as_ref(),
            page.len(),
            &merged,
            &mut self.pagination,
        );

        self.continuation = match next {
            NextPage::Done => Continuation::Done,
            NextPage::Continue { url: Some(href), .. } => Continuation::NextUrl(
                self.configuration
                    .authorize_url(&href, request_url, api_key)?,
            ),
            NextPage::Continue {
                query_params,
                url: None,
            } => Continuation::NextUrl(self.configuration.build_url(
                &self.params,
                api_key,
                &query_params,
            )?),
        };

        self.stats.pages_fetched += 1;
        info!(
            "Fetched page {} ({} records, {})",
            self.stats.pages_fetched,
            page.len(),
            if self.continuation.is_done() {
                "last page"
            } else {
                "more available"
            }
        );
        debug!("Continuation: {:?}", self.continuation.next_url().map(crate::http::redact_url));

        Ok(page.entries)
    }
}

impl<T: Transport> std::fmt::Debug for QueryEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("base_url", &self.configuration.base_url)
            .field("keys", &self.keys)
            .field("state", &self.state())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
