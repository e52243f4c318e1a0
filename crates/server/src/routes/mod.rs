// ABOUTME: Router assembly for the /api surface.
// ABOUTME: Mounts the handlers and wraps them in HTTP tracing and permissive CORS.

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use handlers::{debug_handler, docs_handler, health_handler, scrape_handler};

/// Build the application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api", get(docs_handler))
        .route("/api/", get(docs_handler))
        .route("/api/scrape", post(scrape_handler))
        .route("/api/health", get(health_handler))
        .route("/api/debug", get(debug_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
