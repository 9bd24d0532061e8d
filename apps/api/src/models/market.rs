use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Cardamom price at one market. Constant data, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPriceEntry {
    pub market: String,
    pub price: i64,
    pub trend: Trend,
}

const MARKET_PRICES: [(&str, i64, Trend); 3] = [
    ("Birtamod", 42000, Trend::Up),
    ("Taplejung", 41500, Trend::Stable),
    ("Ilam", 42200, Trend::Down),
];

/// The fixed market price board, in display order.
pub fn market_prices() -> Vec<MarketPriceEntry> {
    MARKET_PRICES
        .iter()
        .map(|&(market, price, trend)| MarketPriceEntry {
            market: market.to_string(),
            price,
            trend,
        })
        .collect()
}
