use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub const TABLE: &'static str = "categories";
}

/// Body of both `POST /categories` and `PUT /categories/:id`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "slug is required"))]
    pub slug: String,
    pub description: Option<String>,
}

impl CategoryCreate {
    pub fn into_record(self, now: DateTime<Utc>) -> Value {
        json!({
            "name": self.name,
            "slug": self.slug,
            "description": self.description,
            "created_at": now,
            "updated_at": now,
        })
    }

    pub fn into_patch(self, now: DateTime<Utc>) -> Value {
        json!({
            "name": self.name,
            "slug": self.slug,
            "description": self.description,
            "updated_at": now,
        })
    }
}
