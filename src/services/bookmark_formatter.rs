//! Renders a bookmark as the Markdown block appended to the destination note.
//!
//! Block layout:
//!
//! ```text
//! ## {title}
//! ### [{url}]({url})
//! {description}
//! Tags: {tag} {tag}
//!
//! ---
//! ```
//!
//! The description and tag lines are omitted when empty. Content lines keep a
//! trailing space before the newline so existing notes stay byte-compatible.

use crate::types::bookmark::Bookmark;

/// Separator closing every block.
pub const SEPARATOR: &str = "--- \n";

/// Heading text: `title` unless it is blank, then `website_title`.
pub fn heading_text(bookmark: &Bookmark) -> &str {
    match bookmark.title.as_deref() {
        Some(title) if !title.trim().is_empty() => title,
        _ => bookmark.website_title.as_deref().unwrap_or(""),
    }
}

/// Formats one bookmark. Pure: equal input gives byte-identical output.
pub fn format_bookmark(bookmark: &Bookmark) -> String {
    let url = bookmark.url.as_deref().unwrap_or("");
    let mut block = format!("## {} \n### [{}]({}) \n", heading_text(bookmark), url, url);

    if let Some(description) = bookmark.description.as_deref() {
        let description = description.trim();
        if !description.is_empty() {
            block.push_str(description);
            block.push_str(" \n");
        }
    }

    match bookmark.tag_names.as_deref() {
        Some(tags) if !tags.is_empty() => {
            block.push_str("Tags: ");
            block.push_str(&tags.join(" "));
            block.push_str(" \n\n");
        }
        _ => block.push('\n'),
    }
    block.push_str(SEPARATOR);
    block
}
