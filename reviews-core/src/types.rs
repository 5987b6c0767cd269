//! Wire records and view-model items for the review list.
//!
//! `ReviewRecord` and `ReviewsEnvelope` mirror the provider's JSON page exactly.
//! `ReviewItem` is the owned view-model the list stores, lays out and binds.
//! Absent and empty photo lists are kept apart all the way through: layout
//! spacing depends on the difference.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LoadError;

/// Line clamp applied to review text until the item is expanded.
pub const DEFAULT_MAX_LINES: u32 = 3;

/// Highest rating a review can carry.
pub const MAX_RATING: u8 = 5;

/// Opaque identity of one review item.
///
/// Generated once when a record is decoded and never reused, including across
/// refreshes: a refreshed page produces fresh ids for the same records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReviewId(Uuid);

impl ReviewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One photo attached to a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// A single review as sent by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub text: String,
    pub created: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub rating: i64,
    /// `None` when the key is missing or `null`; `Some(vec![])` for `[]`.
    #[serde(default)]
    pub photos_url: Option<Vec<PhotoRef>>,
}

/// One page of reviews plus the total number of reviews on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewsEnvelope {
    pub items: Vec<ReviewRecord>,
    pub count: usize,
}

impl ReviewsEnvelope {
    /// Decodes a page envelope from raw provider bytes.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MalformedPayload` when the bytes are not valid JSON or do
    /// not match the envelope schema.
    pub fn decode(bytes: &[u8]) -> Result<Self, LoadError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// A review as the list holds it: decoded, identified and clamp-aware.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub id: ReviewId,
    /// `"{first_name} {last_name}"`.
    pub full_name: String,
    /// Always within `0..=MAX_RATING`.
    pub rating: u8,
    pub text: String,
    /// Display string, shown verbatim.
    pub created: String,
    pub avatar_url: Option<String>,
    /// Photo URLs in provider order; `None` when the record had no photo list.
    pub photos: Option<Vec<String>>,
    /// Line clamp for `text`; `0` means expanded (no clamp).
    pub max_lines: u32,
}

impl ReviewItem {
    /// Builds a fresh item with a new id from a wire record.
    ///
    /// Out-of-range ratings are clamped into `0..=MAX_RATING` rather than failing
    /// the whole page.
    pub fn from_record(record: ReviewRecord) -> Self {
        let rating = clamp_rating(record.rating);
        if i64::from(rating) != record.rating {
            tracing::warn!(rating = record.rating, "review rating out of range, clamped to {}", rating);
        }
        Self {
            id: ReviewId::new(),
            full_name: format!("{} {}", record.first_name, record.last_name),
            rating,
            text: record.text,
            created: record.created,
            avatar_url: record.avatar_url,
            photos: record.photos_url.map(|photos| photos.into_iter().map(|p| p.url).collect()),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.max_lines == 0
    }
}

fn clamp_rating(raw: i64) -> u8 {
    raw.clamp(0, i64::from(MAX_RATING)) as u8
}

/// Renders a rating as five star glyphs, filled from the left.
pub fn rating_glyphs(rating: u8) -> String {
    let filled = usize::from(rating.min(MAX_RATING));
    let empty = usize::from(MAX_RATING) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(photos: &str) -> String {
        format!(
            r#"{{"items":[{{"text":"Nice","created":"1 March","first_name":"Ann","last_name":"Lee","rating":4{photos}}}],"count":1}}"#
        )
    }

    #[test]
    fn absent_null_and_empty_photos_stay_distinct() {
        let absent = ReviewsEnvelope::decode(record_json("").as_bytes()).unwrap();
        let null = ReviewsEnvelope::decode(record_json(r#","photos_url":null"#).as_bytes()).unwrap();
        let empty = ReviewsEnvelope::decode(record_json(r#","photos_url":[]"#).as_bytes()).unwrap();

        assert_eq!(absent.items[0].photos_url, None);
        assert_eq!(null.items[0].photos_url, None);
        assert_eq!(empty.items[0].photos_url, Some(vec![]));

        let item = ReviewItem::from_record(empty.items[0].clone());
        assert_eq!(item.photos, Some(vec![]));
        let item = ReviewItem::from_record(absent.items[0].clone());
        assert_eq!(item.photos, None);
    }

    #[test]
    fn record_maps_into_item() {
        let json = r#"{"items":[{"text":"Great","created":"13 March","avatar_url":"https://a/1.png",
            "first_name":"Ivan","last_name":"Petrov","rating":5,
            "photos_url":[{"type":"image","url":"https://p/1.jpg"},{"type":"image","url":"https://p/2.jpg"}]}],
            "count":7}"#;
        let envelope = ReviewsEnvelope::decode(json.as_bytes()).unwrap();
        assert_eq!(envelope.count, 7);

        let item = ReviewItem::from_record(envelope.items.into_iter().next().unwrap());
        assert_eq!(item.full_name, "Ivan Petrov");
        assert_eq!(item.rating, 5);
        assert_eq!(item.avatar_url.as_deref(), Some("https://a/1.png"));
        assert_eq!(
            item.photos,
            Some(vec!["https://p/1.jpg".to_owned(), "https://p/2.jpg".to_owned()])
        );
        assert_eq!(item.max_lines, DEFAULT_MAX_LINES);
        assert!(!item.is_expanded());
    }

    #[test]
    fn malformed_bytes_are_rejected() {
        let err = ReviewsEnvelope::decode(b"{\"items\": 3}").unwrap_err();
        assert!(matches!(err, LoadError::MalformedPayload(_)));
        assert!(ReviewsEnvelope::decode(b"not json").is_err());
    }

    #[test]
    fn ratings_are_clamped() {
        let mut record: ReviewRecord =
            serde_json::from_str(r#"{"text":"","created":"","first_name":"a","last_name":"b","rating":9}"#)
                .unwrap();
        assert_eq!(ReviewItem::from_record(record.clone()).rating, 5);
        record.rating = -2;
        assert_eq!(ReviewItem::from_record(record).rating, 0);
    }

    #[test]
    fn ids_are_never_reused() {
        let a = ReviewId::new();
        let b = ReviewId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn rating_glyphs_fill_from_left() {
        assert_eq!(rating_glyphs(3), "★★★☆☆");
        assert_eq!(rating_glyphs(0), "☆☆☆☆☆");
        assert_eq!(rating_glyphs(5), "★★★★★");
    }
}
