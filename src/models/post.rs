use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub const TABLE: &'static str = "posts";
}

/// Body of `POST /posts` and `PUT /posts/:id`.
///
/// No `author_id`: a client-supplied one is ignored and the author is taken
/// from the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostCreate {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    #[validate(length(min = 1, message = "slug is required"))]
    pub slug: String,
    pub category_id: Option<String>,
    pub published: Option<bool>,
    pub thumbnail_url: Option<String>,
}

impl PostCreate {
    pub fn into_record(self, author_id: &str, now: DateTime<Utc>) -> Value {
        json!({
            "title": self.title,
            "content": self.content,
            "slug": self.slug,
            "author_id": author_id,
            "category_id": self.category_id,
            "published": self.published.unwrap_or(false),
            "thumbnail_url": self.thumbnail_url,
            "created_at": now,
            "updated_at": now,
        })
    }

    /// Full-field overwrite; author and creation time are left untouched
    pub fn into_patch(self, now: DateTime<Utc>) -> Value {
        json!({
            "title": self.title,
            "content": self.content,
            "slug": self.slug,
            "category_id": self.category_id,
            "published": self.published.unwrap_or(false),
            "thumbnail_url": self.thumbnail_url,
            "updated_at": now,
        })
    }
}

/// Query string of `GET /posts`. Every field stays a raw string so that
/// malformed paging values fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListQuery {
    pub category: Option<String>,
    pub published_only: Option<String>,
    pub author_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PostListQuery {
    /// Defaults to true; any value other than the literal `true` turns it off
    pub fn published_only(&self) -> bool {
        self.published_only.as_deref().map_or(true, |v| v == "true")
    }
}
