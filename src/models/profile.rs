use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub const TABLE: &'static str = "profiles";

    /// A missing flag means "not an admin"
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }

    /// Row written at registration time
    pub fn new_member(id: &str, username: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            avatar_url: None,
            bio: None,
            is_admin: Some(false),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Partial profile update; only the fields present are written.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, message = "username cannot be empty"))]
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn into_patch(self, now: DateTime<Utc>) -> Value {
        let mut patch = Map::new();
        if let Some(username) = self.username {
            patch.insert("username".into(), Value::String(username));
        }
        if let Some(bio) = self.bio {
            patch.insert("bio".into(), Value::String(bio));
        }
        if let Some(avatar_url) = self.avatar_url {
            patch.insert("avatar_url".into(), Value::String(avatar_url));
        }
        patch.insert("updated_at".into(), json!(now));
        Value::Object(patch)
    }
}
