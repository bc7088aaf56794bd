//! Firestore REST value codec.
//!
//! The REST API wraps every field in a typed value object
//! (`{"stringValue": ...}`, `{"integerValue": "24"}`, ...). Encoding is exact;
//! decoding is schema-on-read: a document missing expected fields decodes with
//! defined defaults rather than failing, so store-side shape drift never
//! reaches the rest of the crate. Note `integerValue` carries its number as a
//! JSON string.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Article, ArticleUpdate, Author};

/// One typed Firestore value. Externally tagged, matching the wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Value {
    NullValue(()),
    BooleanValue(bool),
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(DateTime<Utc>),
    StringValue(String),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// A document as returned by the REST API. `fields` is absent for empty
/// documents, hence the default.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// The document id is the last path segment of the full resource name
    /// (`projects/<p>/databases/(default)/documents/news/<id>`).
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

impl Value {
    fn string(s: &str) -> Value {
        Value::StringValue(s.to_string())
    }

    fn integer(n: i64) -> Value {
        Value::IntegerValue(n.to_string())
    }

    /// Coerce to i64. `integerValue` arrives as a string; some writers store
    /// counters as doubles. Anything else coerces to 0.
    pub(crate) fn as_i64(&self) -> i64 {
        match self {
            Value::IntegerValue(s) => s.parse().unwrap_or(0),
            Value::DoubleValue(d) => *d as i64,
            _ => 0,
        }
    }
}

// ============================================================================
// Decoding (schema-on-read with defaults)
// ============================================================================

fn get_string(fields: &BTreeMap<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::StringValue(s)) => s.clone(),
        _ => String::new(),
    }
}

fn get_bool(fields: &BTreeMap<String, Value>, key: &str) -> bool {
    matches!(fields.get(key), Some(Value::BooleanValue(true)))
}

fn get_i64(fields: &BTreeMap<String, Value>, key: &str) -> i64 {
    fields.get(key).map(Value::as_i64).unwrap_or(0)
}

/// Timestamps are normally `timestampValue`, but documents written by older
/// tooling carry RFC 3339 strings. Both decode; anything else is the epoch.
fn get_timestamp(fields: &BTreeMap<String, Value>, key: &str) -> DateTime<Utc> {
    match fields.get(key) {
        Some(Value::TimestampValue(ts)) => *ts,
        Some(Value::StringValue(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::UNIX_EPOCH),
        _ => DateTime::UNIX_EPOCH,
    }
}

fn get_string_array(fields: &BTreeMap<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::ArrayValue(array)) => array
            .values
            .iter()
            .filter_map(|v| match v {
                Value::StringValue(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn get_author(fields: &BTreeMap<String, Value>, key: &str) -> Author {
    match fields.get(key) {
        Some(Value::MapValue(map)) => Author {
            name: get_string(&map.fields, "name"),
            role: get_string(&map.fields, "role"),
        },
        _ => Author::default(),
    }
}

/// Decode a document into an [`Article`], defaulting every missing field.
pub(crate) fn decode_article(doc: &Document) -> Article {
    Article {
        id: Some(doc.id().to_string()),
        title: get_string(&doc.fields, "title"),
        subtitle: get_string(&doc.fields, "subtitle"),
        content: get_string(&doc.fields, "content"),
        image_url: get_string(&doc.fields, "imageUrl"),
        category: get_string(&doc.fields, "category"),
        author: get_author(&doc.fields, "author"),
        date: get_timestamp(&doc.fields, "date"),
        read_time: get_string(&doc.fields, "readTime"),
        tags: get_string_array(&doc.fields, "tags"),
        featured: get_bool(&doc.fields, "featured"),
        published: get_bool(&doc.fields, "published"),
        likes: get_i64(&doc.fields, "likes"),
        views: get_i64(&doc.fields, "views"),
    }
}

// ============================================================================
// Encoding
// ============================================================================

fn encode_author(author: &Author) -> Value {
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), Value::string(&author.name));
    fields.insert("role".to_string(), Value::string(&author.role));
    Value::MapValue(MapValue { fields })
}

fn encode_tags(tags: &[String]) -> Value {
    Value::ArrayValue(ArrayValue {
        values: tags.iter().map(|t| Value::string(t)).collect(),
    })
}

/// Encode a full article for document creation. `id` is never encoded; the
/// store assigns it.
pub(crate) fn encode_article(article: &Article) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    fields.insert("title".to_string(), Value::string(&article.title));
    fields.insert("subtitle".to_string(), Value::string(&article.subtitle));
    fields.insert("content".to_string(), Value::string(&article.content));
    fields.insert("imageUrl".to_string(), Value::string(&article.image_url));
    fields.insert("category".to_string(), Value::string(&article.category));
    fields.insert("author".to_string(), encode_author(&article.author));
    fields.insert("date".to_string(), Value::TimestampValue(article.date));
    fields.insert("readTime".to_string(), Value::string(&article.read_time));
    fields.insert("tags".to_string(), encode_tags(&article.tags));
    fields.insert("featured".to_string(), Value::BooleanValue(article.featured));
    fields.insert("published".to_string(), Value::BooleanValue(article.published));
    fields.insert("likes".to_string(), Value::integer(article.likes));
    fields.insert("views".to_string(), Value::integer(article.views));
    fields
}

/// Encode a partial update: the fields to write plus the update-mask paths.
/// The mask lists exactly the set fields, so unset fields are left untouched
/// at the store.
pub(crate) fn encode_update(update: &ArticleUpdate) -> (BTreeMap<String, Value>, Vec<String>) {
    let mut fields = BTreeMap::new();
    let mut mask = Vec::new();
    let mut put = |key: &str, value: Value| {
        fields.insert(key.to_string(), value);
        mask.push(key.to_string());
    };

    if let Some(title) = &update.title {
        put("title", Value::string(title));
    }
    if let Some(subtitle) = &update.subtitle {
        put("subtitle", Value::string(subtitle));
    }
    if let Some(content) = &update.content {
        put("content", Value::string(content));
    }
    if let Some(image_url) = &update.image_url {
        put("imageUrl", Value::string(image_url));
    }
    if let Some(category) = &update.category {
        put("category", Value::string(category));
    }
    if let Some(author) = &update.author {
        put("author", encode_author(author));
    }
    if let Some(date) = update.date {
        put("date", Value::TimestampValue(date));
    }
    if let Some(read_time) = &update.read_time {
        put("readTime", Value::string(read_time));
    }
    if let Some(tags) = &update.tags {
        put("tags", encode_tags(tags));
    }
    if let Some(featured) = update.featured {
        put("featured", Value::BooleanValue(featured));
    }
    if let Some(published) = update.published {
        put("published", Value::BooleanValue(published));
    }
    if let Some(likes) = update.likes {
        put("likes", Value::integer(likes));
    }
    if let Some(views) = update.views {
        put("views", Value::integer(views));
    }

    (fields, mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn full_document() -> Document {
        let body = serde_json::json!({
            "name": "projects/saivo/databases/(default)/documents/news/abc123",
            "fields": {
                "title": { "stringValue": "Launch" },
                "subtitle": { "stringValue": "We shipped" },
                "content": { "stringValue": "<p>Body</p>" },
                "imageUrl": { "stringValue": "https://img.example/1.jpg" },
                "category": { "stringValue": "Company News" },
                "author": { "mapValue": { "fields": {
                    "name": { "stringValue": "Bahodir Buxorov" },
                    "role": { "stringValue": "CEO" }
                }}},
                "date": { "timestampValue": "2025-05-15T00:00:00Z" },
                "readTime": { "stringValue": "4" },
                "tags": { "arrayValue": { "values": [
                    { "stringValue": "launch" },
                    { "stringValue": "growth" }
                ]}},
                "featured": { "booleanValue": true },
                "published": { "booleanValue": true },
                "likes": { "integerValue": "24" },
                "views": { "integerValue": "156" }
            }
        });
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn decode_full_document() {
        let article = decode_article(&full_document());
        assert_eq!(article.id.as_deref(), Some("abc123"));
        assert_eq!(article.title, "Launch");
        assert_eq!(article.author.name, "Bahodir Buxorov");
        assert_eq!(article.date, Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap());
        assert_eq!(article.tags, vec!["launch".to_string(), "growth".to_string()]);
        assert!(article.featured);
        assert!(article.published);
        assert_eq!(article.likes, 24);
        assert_eq!(article.views, 156);
    }

    #[test]
    fn decode_missing_fields_uses_defaults() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "name": "projects/saivo/databases/(default)/documents/news/bare",
            "fields": { "title": { "stringValue": "Bare" } }
        }))
        .unwrap();
        let article = decode_article(&doc);
        assert_eq!(article.id.as_deref(), Some("bare"));
        assert_eq!(article.title, "Bare");
        assert_eq!(article.subtitle, "");
        assert_eq!(article.author, Author::default());
        assert_eq!(article.date, DateTime::UNIX_EPOCH);
        assert!(article.tags.is_empty());
        assert!(!article.published);
        assert_eq!(article.views, 0);
    }

    #[test]
    fn decode_document_without_fields_key() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "name": "projects/saivo/databases/(default)/documents/news/empty"
        }))
        .unwrap();
        let article = decode_article(&doc);
        assert_eq!(article.id.as_deref(), Some("empty"));
        assert_eq!(article.title, "");
    }

    #[test]
    fn decode_date_from_string_value() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "name": "n/x",
            "fields": { "date": { "stringValue": "2025-01-02T03:04:05Z" } }
        }))
        .unwrap();
        let article = decode_article(&doc);
        assert_eq!(article.date, Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn decode_counter_from_double() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "name": "n/x",
            "fields": { "views": { "doubleValue": 12.0 } }
        }))
        .unwrap();
        assert_eq!(decode_article(&doc).views, 12);
    }

    #[test]
    fn encode_article_wire_shape() {
        let article = decode_article(&full_document());
        let fields = encode_article(&article);
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["title"], serde_json::json!({ "stringValue": "Launch" }));
        assert_eq!(json["likes"], serde_json::json!({ "integerValue": "24" }));
        assert_eq!(json["featured"], serde_json::json!({ "booleanValue": true }));
        assert_eq!(
            json["date"],
            serde_json::json!({ "timestampValue": "2025-05-15T00:00:00Z" })
        );
        assert_eq!(
            json["author"]["mapValue"]["fields"]["role"],
            serde_json::json!({ "stringValue": "CEO" })
        );
        // id never crosses the boundary
        assert!(json.get("id").is_none());
    }

    #[test]
    fn encode_roundtrip_preserves_article() {
        let original = decode_article(&full_document());
        let doc = Document {
            name: full_document().name,
            fields: encode_article(&original),
        };
        assert_eq!(decode_article(&doc), original);
    }

    #[test]
    fn update_mask_lists_only_set_fields() {
        let update = ArticleUpdate {
            title: Some("New title".to_string()),
            published: Some(false),
            ..ArticleUpdate::default()
        };
        let (fields, mask) = encode_update(&update);
        assert_eq!(mask, vec!["title".to_string(), "published".to_string()]);
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("published"));
    }

    #[test]
    fn empty_update_encodes_empty() {
        let (fields, mask) = encode_update(&ArticleUpdate::default());
        assert!(fields.is_empty());
        assert!(mask.is_empty());
    }
}
