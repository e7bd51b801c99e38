//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    adjust_bid_handler, bid_rules_handler, bidding_view_handler, cache_key_handler,
    clear_cache_handler, get_cache_handler, health_handler, remove_cache_handler,
    round_price_handler, set_cache_handler, smart_step_handler, stats_handler,
    validate_bid_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, since web and mobile clients call in directly
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/bids/rules/:asked_price", get(bid_rules_handler))
        .route("/bids/validate", post(validate_bid_handler))
        .route("/bids/step/:price", get(smart_step_handler))
        .route("/bids/adjust", post(adjust_bid_handler))
        .route("/bids/view", post(bidding_view_handler))
        .route("/prices/round/:amount", get(round_price_handler))
        .route("/cache-key", post(cache_key_handler))
        .route("/cache", put(set_cache_handler).delete(clear_cache_handler))
        .route(
            "/cache/:key",
            get(get_cache_handler).delete(remove_cache_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
