// Domain types and value objects
pub mod candle;
pub mod series_key;
pub mod timeframe;

// Re-export commonly used types
pub use candle::Candle;
pub use series_key::SeriesKey;
pub use timeframe::Timeframe;
