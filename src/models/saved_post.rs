use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Bookmark of a post by a user; one row per `(user_id, post_id)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub post_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedPost {
    pub const TABLE: &'static str = "saved_posts";

    pub fn record(user_id: &str, post_id: &str, now: DateTime<Utc>) -> Value {
        json!({
            "post_id": post_id,
            "user_id": user_id,
            "created_at": now,
        })
    }
}
