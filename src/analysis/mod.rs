// Pure computation: indicators, price clustering and level classification.
// Nothing in here performs I/O or holds state between calls.
pub mod batch;
pub mod clustering;
pub mod indicators;
pub mod level_classifier;
pub mod market_bias;

// Re-export commonly used functions
pub use batch::{SeriesAnalysis, analyse_batch, analyse_series};
pub use indicators::{IndicatorArrays, compute_indicators, compute_indicators_from_arrays};
pub use level_classifier::{build_liquidation_zones, detect_levels, detect_levels_from_extremes};
pub use market_bias::{key_signals, market_bias};
