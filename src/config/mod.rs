//! Configuration module for the level-sniper engine.

pub mod analysis;
pub mod cache;
pub mod debug;
pub mod persistence;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, IndicatorParams, LevelParams, LevelSelection};
pub use cache::{CACHE, candles_cache_key, indicators_cache_key, levels_cache_key};
pub use persistence::{STORE_PATH, STORE_VERSION, candle_store_filename};
