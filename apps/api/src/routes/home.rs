use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn home_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Krishimitra API",
        "endpoints": {
            "disease_detect": "/api/disease-detect/",
            "voice_query": "/api/voice-query/",
            "market_prices": "/api/market-prices/",
            "health": "/health"
        }
    }))
}
