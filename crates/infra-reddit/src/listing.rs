//! Reddit Listing JSON
//!
//! Only the fields the scheduler needs are decoded; children keep the order
//! Reddit returns them in.

use chrono::{DateTime, Utc};
use pollwatch_core::domain::Item;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
pub struct Thing {
    pub data: Post,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub created_utc: Option<f64>,
    pub permalink: Option<String>,
}

impl Post {
    fn into_item(self) -> Item {
        let created_at = self
            .created_utc
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0));
        Item {
            id: self.id,
            title: self.title,
            created_at,
            permalink: self.permalink,
        }
    }
}

impl Listing {
    pub fn into_items(self) -> Vec<Item> {
        self.data
            .children
            .into_iter()
            .map(|thing| thing.data.into_item())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": "t3_c",
            "children": [
                {"kind": "t3", "data": {"id": "a", "title": "newest", "created_utc": 1700000300.0, "permalink": "/r/news/comments/a/"}},
                {"kind": "t3", "data": {"id": "b", "title": "middle", "created_utc": 1700000200.0}},
                {"kind": "t3", "data": {"id": "c", "title": "oldest"}}
            ]
        }
    }"#;

    #[test]
    fn test_decode_preserves_order() {
        let listing: Listing = serde_json::from_str(FIXTURE).unwrap();
        let items = listing.into_items();

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(items[0].title, "newest");
        assert_eq!(items[0].permalink.as_deref(), Some("/r/news/comments/a/"));
        assert_eq!(items[0].created_at.unwrap().timestamp(), 1_700_000_300);
        assert!(items[2].created_at.is_none());
    }

    #[test]
    fn test_decode_empty_listing() {
        let listing: Listing = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(listing.into_items().is_empty());
    }

    #[test]
    fn test_decode_rejects_missing_id() {
        let result: Result<Listing, _> =
            serde_json::from_str(r#"{"data": {"children": [{"data": {"title": "x"}}]}}"#);
        assert!(result.is_err());
    }
}
