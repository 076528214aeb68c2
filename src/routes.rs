use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Lead forms are small; anything larger is rejected before parsing.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Public API routes, without state. Callers may add rate limiting on top.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/leads", post(handlers::submit_lead))
        .route("/api/v1/universities", get(handlers::list_universities))
        .route(
            "/api/v1/universities/:slug/fees",
            get(handlers::university_fees),
        )
        .route(
            "/api/v1/universities/:slug/brochure",
            get(handlers::download_brochure),
        )
        .route("/api/v1/fees", get(handlers::fees_for_page))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// Assembles the full application around `api`, with the health check
/// outside of whatever layers `api` carries.
pub fn app(state: Arc<AppState>, api: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Application router without rate limiting.
pub fn router(state: Arc<AppState>) -> Router {
    app(state, api_routes())
}
