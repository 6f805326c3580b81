use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub post_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub const TABLE: &'static str = "comments";
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentCreate {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

impl CommentCreate {
    pub fn into_record(self, post_id: &str, user_id: &str, now: DateTime<Utc>) -> Value {
        json!({
            "content": self.content,
            "post_id": post_id,
            "user_id": user_id,
            "created_at": now,
            "updated_at": now,
        })
    }
}
