//! HTTP route handlers for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness
//! GET  /health/ready               - Readiness (store ping)
//!
//! # Auth
//! POST /api/auth/signup            - Register, returns a token
//! POST /api/auth/login             - Login, returns a token
//! GET  /api/auth/me                - Current user
//! PUT  /api/auth/me                - Update name/theme
//!
//! # Uploads (multipart field `file`)
//! POST /api/upload/avatar          - Replace the caller's avatar
//! POST /api/upload/recipe          - Store a recipe image
//!
//! # Owner-scoped records (requires auth)
//! GET  /api/clients                - List
//! POST /api/clients                - Create
//! PUT  /api/clients/{id}           - Full replace
//! DELETE /api/clients/{id}         - Delete
//! ... same for /api/ingredients, /api/recipes
//! GET  /api/recipes/{id}/calculate - Cost breakdown
//! ... same for /api/orders, where PUT is a partial patch
//!
//! # Dashboard
//! GET  /api/stats/dashboard?period=week|month|quarter|year
//! ```

pub mod auth;
pub mod clients;
pub mod health;
pub mod ingredients;
pub mod orders;
mod owned;
pub mod recipes;
pub mod stats;
pub mod uploads;

pub use owned::Deleted;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Every `/api` route.
///
/// Upload routes accept bodies up to `max_upload_bytes`; everything else
/// keeps axum's default limit.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/upload", upload_routes(max_upload_bytes))
        .nest("/clients", client_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/recipes", recipe_routes())
        .nest("/orders", order_routes())
        .nest("/stats", stats_routes())
}

/// Create the health check router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::live))
        .route("/ready", get(health::ready))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me).put(auth::update_me))
}

/// Create the upload routes router.
pub fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/avatar", post(uploads::avatar))
        .route("/recipe", post(uploads::recipe_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Create the client routes router.
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::index).post(clients::create))
        .route("/{id}", put(clients::replace).delete(clients::delete))
}

/// Create the ingredient routes router.
pub fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ingredients::index).post(ingredients::create))
        .route(
            "/{id}",
            put(ingredients::replace).delete(ingredients::delete),
        )
}

/// Create the recipe routes router.
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::index).post(recipes::create))
        .route("/{id}", put(recipes::replace).delete(recipes::delete))
        .route("/{id}/calculate", get(recipes::calculate))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{id}", put(orders::update).delete(orders::delete))
}

/// Create the stats routes router.
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(stats::dashboard))
}
