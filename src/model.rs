//! Domain types for the `news` collection.
//!
//! The store itself is schema-less; these types define the shape the rest of
//! the crate relies on. Decoding applies defined defaults for missing fields
//! (see `store::value`), so consumers never observe absent optional fields.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author embedded in an article.
///
/// Not a separate entity; there is no referential integrity against any
/// author registry, the sub-record is stored inline with the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub role: String,
}

/// A news article as held in the `news` collection.
///
/// `id` is assigned by the store on creation and is `None` until the article
/// has been persisted. `published` gates inclusion in all public listing
/// queries; `featured` is an orthogonal display flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<String>,
    pub title: String,
    pub subtitle: String,
    /// Rich-text/HTML fragment rendered as-is by the presentation layer.
    pub content: String,
    pub image_url: String,
    /// Open-ended string label; the enumeration lives only in UI filter chips.
    pub category: String,
    pub author: Author,
    pub date: DateTime<Utc>,
    /// Free-text estimate, not computed from content length.
    pub read_time: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub published: bool,
    pub likes: i64,
    pub views: i64,
}

impl Default for Article {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            subtitle: String::new(),
            content: String::new(),
            image_url: String::new(),
            category: String::new(),
            author: Author::default(),
            date: DateTime::UNIX_EPOCH,
            read_time: String::new(),
            tags: Vec::new(),
            featured: false,
            published: false,
            likes: 0,
            views: 0,
        }
    }
}

impl Article {
    /// Case-insensitive substring match across title, subtitle, content, any
    /// tag, and author name, OR-combined. No ranking, no tokenization.
    ///
    /// `needle` must already be lowercased; the caller lowers the search term
    /// once instead of per article.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.subtitle.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
            || self.author.name.to_lowercase().contains(needle)
    }
}

/// Partial update for an article. Only the fields that are `Some` are written;
/// the update mask sent to the store is built from exactly those fields.
#[derive(Debug, Clone, Default)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<Author>,
    pub date: Option<DateTime<Utc>>,
    pub read_time: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub likes: Option<i64>,
    pub views: Option<i64>,
}

impl ArticleUpdate {
    /// True when no field is set; an empty update is a no-op at the store.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.content.is_none()
            && self.image_url.is_none()
            && self.category.is_none()
            && self.author.is_none()
            && self.date.is_none()
            && self.read_time.is_none()
            && self.tags.is_none()
            && self.featured.is_none()
            && self.published.is_none()
            && self.likes.is_none()
            && self.views.is_none()
    }
}

/// Aggregate counts over the published article set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsStats {
    pub total_articles: usize,
    pub featured_articles: usize,
    pub total_views: i64,
    pub total_likes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            title: "Quarterly Review".to_string(),
            subtitle: "Numbers are up".to_string(),
            content: "<p>Revenue grew by 40%.</p>".to_string(),
            tags: vec!["finance".to_string(), "Growth".to_string()],
            author: Author {
                name: "Bahodir Buxorov".to_string(),
                role: "CEO".to_string(),
            },
            ..Article::default()
        }
    }

    #[test]
    fn search_matches_title() {
        assert!(article().matches_search("quarterly"));
    }

    #[test]
    fn search_matches_any_tag() {
        assert!(article().matches_search("growth"));
        assert!(article().matches_search("finance"));
    }

    #[test]
    fn search_matches_author_name() {
        assert!(article().matches_search("buxorov"));
    }

    #[test]
    fn search_matches_content_substring() {
        assert!(article().matches_search("40%"));
    }

    #[test]
    fn search_rejects_absent_term() {
        assert!(!article().matches_search("kubernetes"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(article().matches_search(""));
    }

    #[test]
    fn empty_update_is_empty() {
        assert!(ArticleUpdate::default().is_empty());
        let update = ArticleUpdate {
            likes: Some(3),
            ..ArticleUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
