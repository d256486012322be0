//! Linkding REST client.
//!
//! Issues the single `GET /api/bookmarks/` request a sync run needs and turns the
//! body into a [`BookmarkPage`]. The response shape is trusted only loosely: a body
//! without a `results` array is an empty page, entries that are not objects are
//! skipped, and mistyped attributes read as missing.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::bookmark::{Bookmark, BookmarkPage};
use crate::types::errors::SyncError;
use crate::types::settings::SyncSettings;

/// Longest error body kept in a [`SyncError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for one Linkding instance, configured per call from settings.
#[derive(Debug, Clone, Default)]
pub struct LinkdingClient {
    client: Client,
}

impl LinkdingClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Builds `{instance}/api/bookmarks/?limit=..&offset=..[&q=..]`.
    pub fn bookmarks_url(settings: &SyncSettings) -> Result<Url, SyncError> {
        let base = settings.instance_url.trim().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/api/bookmarks/", base))
            .map_err(|e| SyncError::InvalidUrl(format!("{}: {}", settings.instance_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SyncError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                settings.instance_url,
                url.scheme()
            )));
        }

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("limit", &settings.fetch_limit.to_string())
                .append_pair("offset", &settings.fetch_offset.to_string());
            if !settings.search_query.is_empty() {
                query.append_pair("q", &settings.search_query);
            }
        }
        Ok(url)
    }

    /// Fetches one page of bookmarks.
    pub async fn fetch_bookmarks(&self, settings: &SyncSettings) -> Result<BookmarkPage, SyncError> {
        let url = Self::bookmarks_url(settings)?;
        debug!(url = %url, "Requesting bookmarks");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Token {}", settings.api_key))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(SyncError::Status {
                status: status.as_u16(),
                body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        debug!(body = %body, "Linkding response body");

        let value: Value =
            serde_json::from_str(&body).map_err(|e| SyncError::InvalidResponse(e.to_string()))?;
        Ok(parse_bookmark_page(&value))
    }
}

/// Extracts the bookmarks from a decoded response body.
pub fn parse_bookmark_page(value: &Value) -> BookmarkPage {
    let count = value.get("count").and_then(Value::as_u64);
    let results = match value.get("results").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                match serde_json::from_value::<Bookmark>(item.clone()) {
                    Ok(bookmark) => Some(bookmark),
                    Err(e) => {
                        warn!(index, error = %e, "Skipping bookmark entry that is not an object");
                        None
                    }
                }
            })
            .collect(),
        None => {
            warn!("Response has no results array; treating it as empty");
            Vec::new()
        }
    };
    BookmarkPage { count, results }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
