pub mod health;
pub mod home;
pub mod market;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::detection::handlers as detection;
use crate::state::AppState;
use crate::uploads::MAX_UPLOAD_BYTES;
use crate::voice::handlers as voice;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/disease-detect/",
            get(detection::handle_list_checks).post(detection::handle_detect),
        )
        .route(
            "/api/voice-query/",
            get(voice::handle_list_queries).post(voice::handle_voice_query),
        )
        .route("/api/market-prices/", get(market::market_prices_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
