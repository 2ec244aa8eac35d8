// Data models shared by the engine and the assembler.
// Pure data: no I/O and no caching.

pub mod candle_series;
pub mod indicators;
pub mod levels;
pub mod results;

// Re-export key types for convenience
pub use candle_series::CandleSeries;
pub use indicators::{
    HistogramMomentum, IndicatorSnapshot, MacdSignal, MacdValues, MarketBias, RsiSignal, Trend,
    VolumeConviction,
};
pub use levels::{Level, LevelKind, LiquidationZone, Strength};
pub use results::{DetectedLevels, IndicatorResult, LevelDetectionResult, MarketSummary};
