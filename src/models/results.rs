use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Timeframe;
use crate::models::indicators::{IndicatorSnapshot, MarketBias};
use crate::models::levels::{Level, LiquidationZone};

/// Output of the pure level detector.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct DetectedLevels {
    pub support_levels: Vec<Level>,
    pub resistance_levels: Vec<Level>,
}

impl DetectedLevels {
    pub fn is_empty(&self) -> bool {
        self.support_levels.is_empty() && self.resistance_levels.is_empty()
    }
}

/// Indicator snapshot plus the metadata the API layer reports with it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub indicators: IndicatorSnapshot,
    pub market_bias: MarketBias,
    pub key_signals: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub timeframe: Timeframe,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LevelDetectionResult {
    pub support_levels: Vec<Level>,
    pub resistance_levels: Vec<Level>,
    pub liquidation_zones: Vec<LiquidationZone>,
    pub current_price: f64,
    pub timestamp: DateTime<Utc>,
}

/// Both result shapes for one symbol/timeframe.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MarketSummary {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub current_price: Option<f64>,
    pub indicators: IndicatorResult,
    pub levels: LevelDetectionResult,
    pub timestamp: DateTime<Utc>,
}
