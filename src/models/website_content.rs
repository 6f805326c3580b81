use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::Validate;

/// Editable page copy, addressed by `page_name` rather than by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub page_name: String,
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WebsiteContent {
    pub const TABLE: &'static str = "website_content";
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WebsiteContentCreate {
    #[validate(length(min = 1, message = "page_name is required"))]
    pub page_name: String,
    pub content: Map<String, Value>,
}

impl WebsiteContentCreate {
    pub fn into_record(self, updated_by: &str, now: DateTime<Utc>) -> Value {
        json!({
            "page_name": self.page_name,
            "content": self.content,
            "updated_by": updated_by,
            "created_at": now,
            "updated_at": now,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WebsiteContentUpdate {
    pub content: Map<String, Value>,
}

impl WebsiteContentUpdate {
    pub fn into_patch(self, updated_by: &str, now: DateTime<Utc>) -> Value {
        json!({
            "content": self.content,
            "updated_by": updated_by,
            "updated_at": now,
        })
    }
}
