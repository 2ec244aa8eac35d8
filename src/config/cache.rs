//! Cache TTLs and key layout for the snapshot assembler

use crate::domain::Timeframe;

pub struct CacheTtls {
    /// Raw candle sequences (seconds)
    pub candles_secs: u64,
    /// Indicator results (seconds)
    pub indicators_secs: u64,
    /// Support/resistance results; short because they track live price (seconds)
    pub levels_secs: u64,
}

pub struct CacheConfig {
    pub ttl: CacheTtls,
}

pub const CACHE: CacheConfig = CacheConfig {
    ttl: CacheTtls {
        candles_secs: 3600,
        indicators_secs: 300,
        levels_secs: 300,
    },
};

pub fn candles_cache_key(symbol: &str, timeframe: Timeframe, limit: usize) -> String {
    format!("ohlc:{}:{}:{}", symbol, timeframe, limit)
}

pub fn indicators_cache_key(symbol: &str, timeframe: Timeframe, limit: usize) -> String {
    format!("indicators:{}:{}:{}", symbol, timeframe, limit)
}

// Levels depend on lookback and sensitivity too, so both are part of the key.
pub fn levels_cache_key(
    symbol: &str,
    timeframe: Timeframe,
    lookback_periods: usize,
    sensitivity: f64,
) -> String {
    format!(
        "liquidity:{}:{}:{}:{}",
        symbol, timeframe, lookback_periods, sensitivity
    )
}
