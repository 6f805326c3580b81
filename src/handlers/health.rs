use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "Lab Hack Nexus API";

/// GET / - service index
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "auth": "/auth/register, /auth/login (public)",
            "posts": "/posts[/:id] (read public, write authenticated)",
            "comments": "/posts/:id/comments[/:comment_id] (read public, write authenticated)",
            "saved_posts": "/posts/:id/save, /posts/:id/unsave, /saved-posts (authenticated)",
            "categories": "/categories[/:id] (read public, write admin)",
            "profiles": "/profiles/me (authenticated), /profiles/:id",
            "website_content": "/website-content[/:page_name] (read public, write admin)"
        }
    }))
}

/// GET /health - liveness; does not touch the backend
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": Utc::now(),
    }))
}
