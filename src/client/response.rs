//! Response envelope types for the academy backend.
//!
//! Every 2xx response body is `{ data, pagination?, message? }`; error
//! bodies carry a `message` field the UI shows verbatim.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Standard response envelope wrapping every successful payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// The payload.
    pub data: T,
    /// Pagination metadata, present on list responses.
    #[serde(default)]
    pub pagination: Option<Pagination>,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based).
    pub current_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_items: u64,
}

/// A page of items together with its pagination metadata.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Pagination metadata, when the backend provided it.
    pub pagination: Option<Pagination>,
}

impl<T> From<ApiEnvelope<Vec<T>>> for Paged<T> {
    fn from(envelope: ApiEnvelope<Vec<T>>) -> Self {
        Self {
            items: envelope.data,
            pagination: envelope.pagination,
        }
    }
}

/// Extract the backend's `message` field from an error response body.
///
/// Returns `None` when the body is not JSON or carries no message.
pub(crate) async fn error_message(response: reqwest::Response) -> Option<String> {
    let value: serde_json::Value = response.json().await.ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Decode an envelope body, mapping decode failures to a uniform error text.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    body: &[u8],
) -> std::result::Result<ApiEnvelope<T>, serde_json::Error> {
    serde_json::from_slice(body)
}
