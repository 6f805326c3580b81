pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod posts;
pub mod profiles;
pub mod saved_posts;
pub mod website_content;

mod utils;
