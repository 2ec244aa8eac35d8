//! Indicator and level-detection configuration

use serde::{Deserialize, Serialize};

/// Windows for the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    // MACD legs
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub macd_signal_period: usize,
    // Trend EMAs, reported as ema_20 / ema_50
    pub ema_short: usize,
    pub ema_long: usize,
    pub volume_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        ANALYSIS.indicators
    }
}

/// How the five reported levels per side are picked from the significant clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSelection {
    /// Lowest supports and highest resistances (historical behaviour).
    #[default]
    Extremes,
    /// Levels closest to the current price on each side.
    NearestToPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Number of most recent candles whose highs/lows are clustered.
    pub lookback_periods: usize,
    /// Relative tolerance for joining a cluster (0.02 = 2%).
    pub sensitivity: f64,
    /// Levels reported per side.
    pub max_levels: usize,
    pub selection: LevelSelection,
}

impl Default for LevelParams {
    fn default() -> Self {
        ANALYSIS.levels
    }
}

pub struct RsiThresholds {
    pub oversold: f64,
    pub overbought: f64,
    // Added to the average loss so a loss-free window does not divide by zero
    pub epsilon: f64,
}

/// Distance (percent of current price) below which a level is strong / medium.
pub struct StrengthThresholds {
    pub strong_pct: f64,
    pub medium_pct: f64,
}

/// Heuristic inputs for the market-bias vote and key signals.
pub struct BiasThresholds {
    pub rsi_bullish_below: f64,
    pub rsi_bearish_above: f64,
    pub high_volume_ratio: f64,
    pub low_volume_ratio: f64,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub indicators: IndicatorParams,
    pub levels: LevelParams,
    pub rsi: RsiThresholds,
    pub strength: StrengthThresholds,
    pub bias: BiasThresholds,
    /// Candles fetched per request when the caller does not say.
    pub default_candle_limit: usize,
    /// Upper bound on lookback so clustering stays O(n·k) with small n.
    pub max_lookback_periods: usize,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    indicators: IndicatorParams {
        rsi_period: 14,
        ema_fast: 12,
        ema_slow: 26,
        macd_signal_period: 9,
        ema_short: 20,
        ema_long: 50,
        volume_window: 20,
    },

    levels: LevelParams {
        lookback_periods: 240,
        sensitivity: 0.02,
        max_levels: 5,
        selection: LevelSelection::Extremes,
    },

    rsi: RsiThresholds {
        oversold: 30.0,
        overbought: 70.0,
        epsilon: 1e-10,
    },

    strength: StrengthThresholds {
        strong_pct: 2.0,
        medium_pct: 5.0,
    },

    bias: BiasThresholds {
        rsi_bullish_below: 40.0,
        rsi_bearish_above: 60.0,
        high_volume_ratio: 1.5,
        low_volume_ratio: 0.5,
    },

    default_candle_limit: 240,
    max_lookback_periods: 1000,
};
