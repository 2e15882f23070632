//! Decoder types
//!
//! Typed views of the upstream's error descriptors and the decoded page.

use crate::types::Record;
use serde::Deserialize;
use serde_json::Value;

/// A decoded results page
#[derive(Debug, Clone, Default)]
pub struct DecodedPage {
    /// Object under the result root key, if the body had one
    pub root: Option<Value>,
    /// Result entries, in upstream order
    pub entries: Vec<Record>,
}

impl DecodedPage {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the page has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Error body shapes the upstream is known to send
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// `service-error` descriptor (most API errors)
    #[serde(rename = "service-error")]
    pub service_error: Option<ServiceError>,
    /// `error-response` descriptor (gateway/quota errors)
    #[serde(rename = "error-response")]
    pub error_response: Option<ErrorResponse>,
    /// Plain `error` string
    pub error: Option<String>,
}

/// `service-error` descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceError {
    /// Status block
    #[serde(default)]
    pub status: ServiceStatus,
}

/// `service-error.status` block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceStatus {
    /// Machine-readable status code (e.g. "INVALID_INPUT")
    #[serde(rename = "statusCode")]
    pub status_code: Option<String>,
    /// Human-readable text
    #[serde(rename = "statusText")]
    pub status_text: Option<String>,
}

/// `error-response` descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "error-code")]
    pub error_code: Option<String>,
    #[serde(rename = "error-message")]
    pub error_message: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message carried by the body
    pub fn message(&self) -> Option<String> {
        if let Some(status) = self.service_error.as_ref().map(|e| &e.status) {
            match (&status.status_code, &status.status_text) {
                (Some(code), Some(text)) => return Some(format!("{code}: {text}")),
                (None, Some(text)) => return Some(text.clone()),
                (Some(code), None) => return Some(code.clone()),
                (None, None) => {}
            }
        }
        if let Some(resp) = &self.error_response {
            if let Some(msg) = resp.error_message.clone().or_else(|| resp.error_code.clone()) {
                return Some(msg);
            }
        }
        self.error.clone()
    }
}
