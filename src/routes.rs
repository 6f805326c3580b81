use axum::{
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::handlers::{auth, categories, comments, health, posts, profiles, saved_posts, website_content};
use crate::middleware::{authenticate, require_admin};
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .merge(auth_routes())
        // Mixed public reads and guarded writes
        .merge(post_routes(&state))
        .merge(category_routes(&state))
        .merge(profile_routes(&state))
        .merge(website_content_routes(&state))
        .with_state(state)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(CorsLayer::permissive()),
        )
}

/// Authentication stage in front of `route`
fn authenticated(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}

/// Authentication stage, then the admin stage, in front of `route`
fn admin_only(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    authenticated(state, route.route_layer(middleware::from_fn(require_admin)))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn post_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(posts::list_posts).merge(authenticated(state, post(posts::create_post))),
        )
        .route(
            "/posts/:id",
            get(posts::get_post).merge(authenticated(
                state,
                put(posts::update_post).delete(posts::delete_post),
            )),
        )
        .route(
            "/posts/:id/comments",
            get(comments::list_comments).merge(authenticated(state, post(comments::create_comment))),
        )
        .route(
            "/posts/:id/comments/:comment_id",
            authenticated(state, delete(comments::delete_comment)),
        )
        .route("/posts/:id/save", authenticated(state, post(saved_posts::save_post)))
        .route("/posts/:id/unsave", authenticated(state, delete(saved_posts::unsave_post)))
        .route("/saved-posts", authenticated(state, get(saved_posts::list_saved_posts)))
}

fn category_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).merge(admin_only(state, post(categories::create_category))),
        )
        .route(
            "/categories/:id",
            get(categories::get_category).merge(admin_only(
                state,
                put(categories::update_category).delete(categories::delete_category),
            )),
        )
}

fn profile_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Registered before `/profiles/:id`; axum prefers the static segment anyway
        .route("/profiles/me", authenticated(state, get(profiles::get_current_profile)))
        .route(
            "/profiles/:id",
            get(profiles::get_profile).merge(authenticated(state, put(profiles::update_profile))),
        )
}

fn website_content_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/website-content", admin_only(state, post(website_content::create_content)))
        .route(
            "/website-content/:page_name",
            get(website_content::get_content).merge(admin_only(
                state,
                put(website_content::update_content).delete(website_content::delete_content),
            )),
        )
}
