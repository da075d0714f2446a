//! # Routes
//!
//! Axum router configuration for the pricing API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /            - Static acknowledgment
/// - HEAD /            - Empty 200
/// - GET  /health      - Static acknowledgment
/// - POST /            - Price a shipment
/// - POST /upload_data - Price a shipment
/// - POST /webhook     - Signed callback, priced after signature check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pricing_routes = Router::new()
        .route(
            "/",
            get(handlers::ack)
                .head(handlers::head_ack)
                .post(handlers::upload_data),
        )
        .route("/health", get(handlers::ack))
        .route("/upload_data", post(handlers::upload_data))
        .layer(cors);

    // Webhooks are server-to-server, no CORS
    let webhook_routes = Router::new().route("/webhook", post(handlers::webhook));

    Router::new()
        .merge(pricing_routes)
        .merge(webhook_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
