pub mod api;
pub mod baas;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
