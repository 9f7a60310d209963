use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        // Incident log
        .route(
            "/v1/incidents",
            get(handlers::list_incidents).post(handlers::create_incident),
        )
        .route("/v1/incidents/form", post(handlers::submit_incident_form))
        .route("/v1/incidents/:id", get(handlers::get_incident))
        // Aggregates
        .route("/v1/stats", get(handlers::statistics))
        .route("/v1/reports", get(handlers::report))
        // Machine-readable export in store format
        .route("/api/incidents", get(handlers::export_incidents))
        .route("/metrics", get(handlers::metrics))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
