//! Decoder implementations

use super::types::{DecodedPage, ErrorBody};
use crate::error::{Error, Result};
use crate::types::Record;
use serde_json::Value;

/// Longest slice of a raw body quoted in an error message
const MAX_BODY_SNIPPET: usize = 200;

/// Decodes result pages nested under a root key
#[derive(Debug, Clone)]
pub struct PageDecoder {
    root_key: String,
    strict: bool,
}

impl PageDecoder {
    /// Create a lenient decoder: a missing root yields an empty page
    pub fn new(root_key: impl Into<String>) -> Self {
        Self {
            root_key: root_key.into(),
            strict: false,
        }
    }

    /// Require the root key to be present
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Decode a 200 body into a page
    pub fn decode(&self, body: &str) -> Result<DecodedPage> {
        let mut value = parse_body(body)?;

        let root = match value.get_mut(&self.root_key).map(Value::take) {
            Some(root @ Value::Object(_)) => Some(root),
            Some(_) | None if self.strict => {
                return Err(Error::malformed(format!(
                    "expected object under '{}'",
                    self.root_key
                )));
            }
            _ => None,
        };

        let entries = root.as_ref().map(extract_entries).unwrap_or_default();
        Ok(DecodedPage { root, entries })
    }
}

/// Parse a body as JSON
pub fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("body is not valid JSON: {e}")))
}

/// Result entries under `entry`
///
/// A lone object is treated as a one-entry page; anything else as none.
pub fn extract_entries(root: &Value) -> Vec<Record> {
    match root.get("entry") {
        Some(Value::Array(entries)) => entries.clone(),
        Some(entry @ Value::Object(_)) => vec![entry.clone()],
        _ => Vec::new(),
    }
}

/// `@href` of the first `link` whose `@ref` equals `rel`
pub fn find_link(root: &Value, rel: &str) -> Option<String> {
    let matches = |link: &Value| link.get("@ref").and_then(Value::as_str) == Some(rel);

    let link = match root.get("link")? {
        Value::Array(links) => links.iter().find(|l| matches(l))?,
        link @ Value::Object(_) if matches(link) => link,
        _ => return None,
    };

    link.get("@href")
        .and_then(Value::as_str)
        .filter(|href| !href.is_empty())
        .map(String::from)
}

/// Human-readable message for a failed response body
///
/// Uses the upstream's error descriptor when there is one, otherwise a
/// truncated copy of the raw body.
pub fn error_message(body: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
    {
        return message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    match trimmed.char_indices().nth(MAX_BODY_SNIPPET) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
