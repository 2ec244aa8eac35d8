use serde::{Deserialize, Serialize};

use crate::domain::timeframe::Timeframe;

/// Identifies one candle series: a trading pair at a given bucket width.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct SeriesKey {
    pub symbol: String,
    pub timeframe: Timeframe,
}

impl SeriesKey {
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
        }
    }

    // Symbols arrive as "BTC/USD" from the API layer and "BTCUSDT" from exchanges.
    pub fn split_symbol(&self) -> Option<(&str, &str)> {
        if let Some((base, quote)) = self.symbol.split_once('/') {
            return Some((base, quote));
        }
        static PAIR_QUOTES: &[&str] = &["USDT", "USDC", "FDUSD", "USD", "BTC", "ETH"];
        PAIR_QUOTES
            .iter()
            .find(|&&q| self.symbol.len() > q.len() && self.symbol.ends_with(q))
            .map(|&q| (&self.symbol[..self.symbol.len() - q.len()], q))
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}@{}", self.symbol, self.timeframe)
    }
}
