use axum::Json;

use crate::models::market::{market_prices, MarketPriceEntry};

/// GET /api/market-prices/
pub async fn market_prices_handler() -> Json<Vec<MarketPriceEntry>> {
    Json(market_prices())
}
