use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::indicators::compute_indicators;
use crate::analysis::level_classifier::detect_levels;
use crate::config::{IndicatorParams, LevelParams};
use crate::domain::SeriesKey;
use crate::models::{CandleSeries, DetectedLevels, IndicatorSnapshot};

/// Indicators and levels for one series, computed against its own latest close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    pub key: SeriesKey,
    pub current_price: Option<f64>,
    pub indicators: IndicatorSnapshot,
    pub levels: DetectedLevels,
}

pub fn analyse_series(
    key: SeriesKey,
    series: &CandleSeries,
    indicator_params: &IndicatorParams,
    level_params: &LevelParams,
) -> SeriesAnalysis {
    let current_price = series.current_price();
    SeriesAnalysis {
        key,
        current_price,
        indicators: compute_indicators(series, indicator_params),
        levels: detect_levels(series, level_params, current_price.unwrap_or(0.0)),
    }
}

/// Analyse many independent series in parallel. Series share nothing, so
/// each result is identical to a sequential `analyse_series` call.
pub fn analyse_batch(
    inputs: &[(SeriesKey, CandleSeries)],
    indicator_params: &IndicatorParams,
    level_params: &LevelParams,
) -> Vec<SeriesAnalysis> {
    inputs
        .par_iter()
        .map(|(key, series)| analyse_series(key.clone(), series, indicator_params, level_params))
        .collect()
}
