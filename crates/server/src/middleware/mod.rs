//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS
//! 5. Body limit on uploads
//!
//! Authentication is an extractor ([`RequireAuth`]) rather than a layer, so
//! signup, login and health checks stay open.

pub mod auth;
pub mod cors;
pub mod request_id;

pub use auth::RequireAuth;
pub use cors::cors_layer;
pub use request_id::request_id_middleware;
