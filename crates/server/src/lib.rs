//! Sugarbook Server library.
//!
//! JSON API for a small confectionery business: accounts, clients,
//! ingredients, recipes with cost rollup, orders and a dashboard. Every
//! record belongs to exactly one user and is invisible to everyone else.
//!
//! The router is built by [`app`] so the binary and the integration tests
//! serve the same stack.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::http::{Request, Response};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use services::uploads::PUBLIC_PREFIX;
use state::AppState;

/// Build the complete application router.
///
/// # Layer Order (outermost first)
///
/// Sentry hub and HTTP context, request span, request ID, CORS. Upload
/// routes additionally carry their own body limit.
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let uploads = ServeDir::new(&config.uploads_dir);
    let cors = middleware::cors_layer(&config.cors_origins);
    let max_upload_bytes = config.max_upload_bytes;

    Router::new()
        .nest("/health", routes::health_routes())
        .nest("/api", routes::api_routes(max_upload_bytes))
        .nest_service(PUBLIC_PREFIX, uploads)
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
