// Search Result Item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a search result (used as the job cursor)
pub type ItemId = String;

/// One entry of a search batch returned by a SearchProvider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
    pub permalink: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at: None,
            permalink: None,
        }
    }
}
