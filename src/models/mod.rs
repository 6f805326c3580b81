pub mod auth;
pub mod category;
pub mod comment;
pub mod identity;
pub mod post;
pub mod profile;
pub mod saved_post;
pub mod website_content;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use category::{Category, CategoryCreate};
pub use comment::{Comment, CommentCreate};
pub use identity::{AuthSession, Identity};
pub use post::{Post, PostCreate, PostListQuery};
pub use profile::{Profile, ProfileUpdate};
pub use saved_post::SavedPost;
pub use website_content::{WebsiteContent, WebsiteContentCreate, WebsiteContentUpdate};

use serde::{Deserialize, Serialize};

/// Plain `{ "message": ... }` confirmation body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
