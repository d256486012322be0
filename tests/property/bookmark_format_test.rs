//! Property-based tests for bookmark block formatting.
//!
//! Formatting is a pure function of the record: it is deterministic, picks the
//! heading by the title fallback rule, and only writes a tag line for non-empty tags.

use linkding_sync::services::bookmark_formatter::format_bookmark;
use linkding_sync::types::bookmark::Bookmark;
use proptest::prelude::*;

fn arb_word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,12}"
}

fn arb_opt_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 .,]{0,40}")
}

fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    (
        arb_opt_text(),
        arb_opt_text(),
        proptest::option::of("https?://[a-z]{1,10}\\.[a-z]{2,3}/[a-z0-9]{0,8}"),
        arb_opt_text(),
        proptest::option::of(proptest::collection::vec(arb_word(), 0..5)),
    )
        .prop_map(|(title, website_title, url, description, tag_names)| Bookmark {
            title,
            website_title,
            url,
            description,
            tag_names,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn formatting_is_deterministic(bookmark in arb_bookmark()) {
        prop_assert_eq!(format_bookmark(&bookmark), format_bookmark(&bookmark.clone()));
    }

    #[test]
    fn blank_title_falls_back_to_website_title(
        blank in "[ \t]{0,4}",
        website_title in "[a-zA-Z][a-zA-Z0-9 ]{0,20}",
    ) {
        let bookmark = Bookmark {
            title: Some(blank),
            website_title: Some(website_title.clone()),
            ..Bookmark::default()
        };
        let block = format_bookmark(&bookmark);
        let expected = format!("## {} \n", website_title);
        prop_assert!(block.starts_with(&expected));
    }

    #[test]
    fn non_blank_title_never_uses_website_title(
        title in "[a-zA-Z][a-zA-Z0-9]{0,20}",
        website_title in "[a-zA-Z][a-zA-Z0-9]{0,20}",
    ) {
        let bookmark = Bookmark {
            title: Some(title.clone()),
            website_title: Some(website_title),
            ..Bookmark::default()
        };
        let block = format_bookmark(&bookmark);
        let heading = block.lines().next().unwrap_or_default().to_string();
        prop_assert_eq!(heading, format!("## {} ", title));
    }

    #[test]
    fn tag_line_only_for_non_empty_tags(bookmark in arb_bookmark()) {
        let block = format_bookmark(&bookmark);
        let has_tags = bookmark.tag_names.as_ref().is_some_and(|t| !t.is_empty());

        prop_assert_eq!(block.lines().any(|l| l.starts_with("Tags: ")), has_tags);
        prop_assert!(block.ends_with("\n--- \n"));
        if let Some(tags) = bookmark.tag_names.as_ref().filter(|t| !t.is_empty()) {
            let expected = format!("Tags: {} \n", tags.join(" "));
            prop_assert!(block.contains(&expected));
        }
    }
}
