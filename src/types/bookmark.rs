use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A bookmark record as returned by the Linkding REST API.
///
/// Every attribute is optional: the API response is trusted only as far as
/// individual fields go. A missing attribute, or one of the wrong type, reads as
/// `None` and is formatted as empty text.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Bookmark {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub website_title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// Non-string entries are dropped from the list.
    #[serde(deserialize_with = "lenient_tags")]
    pub tag_names: Option<Vec<String>>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }))
}

/// One page of the `/api/bookmarks/` listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPage {
    /// Total number of bookmarks matching the query, when the server reports it.
    pub count: Option<u64>,
    pub results: Vec<Bookmark>,
}
