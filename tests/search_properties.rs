//! Property-based tests for the search predicate.
//!
//! `Article::matches_search` is the one piece of pure logic with a wide input
//! space, so it gets proptest coverage: any substring of any indexed field
//! must match, case must never matter, and a match implies the needle really
//! occurs in one of the indexed fields.

use proptest::prelude::*;
use saivo_news::{Article, Author};

fn field_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 ,.!?-]{0,24}").unwrap()
}

fn arbitrary_article() -> impl Strategy<Value = Article> {
    (
        field_text(),
        field_text(),
        field_text(),
        proptest::collection::vec(field_text(), 0..4),
        field_text(),
    )
        .prop_map(|(title, subtitle, content, tags, author_name)| Article {
            title,
            subtitle,
            content,
            tags,
            author: Author {
                name: author_name,
                role: "Staff".to_string(),
            },
            ..Article::default()
        })
}

/// The naive spelling of the predicate, kept independent of the
/// implementation under test.
fn naive_matches(article: &Article, needle: &str) -> bool {
    let fields = article
        .tags
        .iter()
        .map(String::as_str)
        .chain([
            article.title.as_str(),
            article.subtitle.as_str(),
            article.content.as_str(),
            article.author.name.as_str(),
        ]);
    fields
        .map(str::to_lowercase)
        .any(|field| field.contains(needle))
}

proptest! {
    #[test]
    fn any_title_substring_matches(article in arbitrary_article(), start in 0usize..24, len in 0usize..24) {
        let chars: Vec<char> = article.title.chars().collect();
        let start = start.min(chars.len());
        let end = (start + len).min(chars.len());
        let needle: String = chars[start..end].iter().collect::<String>().to_lowercase();
        prop_assert!(article.matches_search(&needle));
    }

    #[test]
    fn matching_is_case_insensitive(article in arbitrary_article(), needle in field_text()) {
        let needle = needle.to_lowercase();
        let mut shouted = article.clone();
        shouted.title = article.title.to_uppercase();
        shouted.subtitle = article.subtitle.to_uppercase();
        shouted.content = article.content.to_uppercase();
        shouted.tags = article.tags.iter().map(|t| t.to_uppercase()).collect();
        shouted.author.name = article.author.name.to_uppercase();

        prop_assert_eq!(article.matches_search(&needle), shouted.matches_search(&needle));
    }

    #[test]
    fn agrees_with_naive_predicate(article in arbitrary_article(), needle in field_text()) {
        let needle = needle.to_lowercase();
        prop_assert_eq!(article.matches_search(&needle), naive_matches(&article, &needle));
    }

    #[test]
    fn empty_needle_matches_every_article(article in arbitrary_article()) {
        prop_assert!(article.matches_search(""));
    }
}
