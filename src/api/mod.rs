//! API module
//!
//! HTTP API endpoints and middleware.

pub mod context;
pub mod middleware;
pub mod routes;

use axum::{
    http::{header, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::summary::SummaryService;

pub use context::RequestContext;
pub use routes::create_router;

/// Build the full application router: health check plus `/api/v1` routes.
pub fn build_app(summaries: SummaryService) -> Router {
    // Layers run last-added first: context -> logging -> handler
    let api_routes = create_router()
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::request_context_middleware));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(summaries)
}

/// The dashboard front-end is served from another origin
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static(middleware::REQUEST_ID_HEADER)])
        .expose_headers([header::HeaderName::from_static(middleware::REQUEST_ID_HEADER)])
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
