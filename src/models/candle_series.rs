use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::candle::Candle;
use crate::error::{EngineError, EngineResult};
use crate::utils::maths_utils::{get_max, get_min};

// ============================================================================
// CandleSeries: validated, chronological OHLCV data for one symbol/timeframe
// ============================================================================

/// Column-oriented candle storage. Every column has the same length and
/// `times` is strictly increasing.
///
/// The columns are private and serde goes through `Vec<Candle>`, so a decoded
/// series (cache entry, store file) is validated by [`CandleSeries::new`]
/// exactly like one built in code.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(try_from = "Vec<Candle>", into = "Vec<Candle>")]
pub struct CandleSeries {
    times: Vec<DateTime<Utc>>,

    // Prices
    open_prices: Vec<f64>,
    high_prices: Vec<f64>,
    low_prices: Vec<f64>,
    close_prices: Vec<f64>,

    // Volumes
    volumes: Vec<f64>,
}

impl TryFrom<Vec<Candle>> for CandleSeries {
    type Error = EngineError;

    fn try_from(candles: Vec<Candle>) -> EngineResult<Self> {
        CandleSeries::new(candles)
    }
}

impl From<CandleSeries> for Vec<Candle> {
    fn from(series: CandleSeries) -> Self {
        series.candles()
    }
}

impl CandleSeries {
    /// Build a series from chronologically ordered candles.
    pub fn new(candles: Vec<Candle>) -> EngineResult<Self> {
        let mut series = CandleSeries::with_capacity(candles.len());

        for (index, candle) in candles.into_iter().enumerate() {
            candle
                .validate()
                .map_err(|reason| EngineError::InvalidSequence { index, reason })?;

            if let Some(prev) = series.times.last()
                && candle.time <= *prev
            {
                return Err(EngineError::InvalidSequence {
                    index,
                    reason: format!(
                        "time {} does not follow {} (timestamps must strictly increase)",
                        candle.time, prev
                    ),
                });
            }
            series.push_unchecked(candle);
        }

        Ok(series)
    }

    fn with_capacity(n: usize) -> Self {
        Self {
            times: Vec::with_capacity(n),
            open_prices: Vec::with_capacity(n),
            high_prices: Vec::with_capacity(n),
            low_prices: Vec::with_capacity(n),
            close_prices: Vec::with_capacity(n),
            volumes: Vec::with_capacity(n),
        }
    }

    fn push_unchecked(&mut self, candle: Candle) {
        self.times.push(candle.time);
        self.open_prices.push(candle.open);
        self.high_prices.push(candle.high);
        self.low_prices.push(candle.low);
        self.close_prices.push(candle.close);
        self.volumes.push(candle.volume);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn closes(&self) -> &[f64] {
        &self.close_prices
    }

    pub fn highs(&self) -> &[f64] {
        &self.high_prices
    }

    pub fn lows(&self) -> &[f64] {
        &self.low_prices
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn get_candle(&self, idx: usize) -> Option<Candle> {
        if idx >= self.len() {
            return None;
        }
        Some(Candle::new(
            self.times[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        ))
    }

    pub fn candles(&self) -> Vec<Candle> {
        (0..self.len()).filter_map(|i| self.get_candle(i)).collect()
    }

    pub fn last_candle(&self) -> Option<Candle> {
        self.len().checked_sub(1).and_then(|i| self.get_candle(i))
    }

    /// Latest close, used as the reference price for level classification.
    pub fn current_price(&self) -> Option<f64> {
        self.close_prices.last().copied()
    }

    /// Lowest low and highest high, or `None` for an empty series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        Some((get_min(&self.low_prices), get_max(&self.high_prices)))
    }

    /// The most recent `limit` candles, still oldest-first.
    pub fn tail(&self, limit: usize) -> CandleSeries {
        let start = self.len().saturating_sub(limit);
        CandleSeries {
            times: self.times[start..].to_vec(),
            open_prices: self.open_prices[start..].to_vec(),
            high_prices: self.high_prices[start..].to_vec(),
            low_prices: self.low_prices[start..].to_vec(),
            close_prices: self.close_prices[start..].to_vec(),
            volumes: self.volumes[start..].to_vec(),
        }
    }

    /// Highs and lows of the last `lookback` candles, newest first.
    /// This is the order the clustering engine consumes.
    pub fn recent_extremes_newest_first(&self, lookback: usize) -> (Vec<f64>, Vec<f64>) {
        let start = self.len().saturating_sub(lookback);
        let highs = self.high_prices[start..].iter().rev().copied().collect();
        let lows = self.low_prices[start..].iter().rev().copied().collect();
        (highs, lows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn candle_at(hour: i64, close: f64) -> Candle {
        let time = DateTime::<Utc>::UNIX_EPOCH + Duration::hours(hour);
        Candle::new(time, close, close + 1.0, close - 1.0, close, 10.0)
    }

    #[test]
    fn accepts_strictly_increasing_series() {
        let series = CandleSeries::new(vec![candle_at(0, 10.0), candle_at(1, 11.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), &[10.0, 11.0]);
        assert_eq!(series.current_price(), Some(11.0));
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let err = CandleSeries::new(vec![candle_at(0, 10.0), candle_at(0, 11.0)]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSequence { index: 1, .. }));
    }

    #[test]
    fn rejects_out_of_order_timestamps() {
        let err = CandleSeries::new(vec![candle_at(2, 10.0), candle_at(1, 11.0)]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSequence { index: 1, .. }));
    }

    #[test]
    fn rejects_invalid_candle() {
        let mut bad = candle_at(0, 10.0);
        bad.volume = -5.0;
        assert!(CandleSeries::new(vec![bad]).is_err());
    }

    #[test]
    fn tail_keeps_newest_in_chronological_order() {
        let series =
            CandleSeries::new((0..5).map(|h| candle_at(h, 10.0 + h as f64)).collect()).unwrap();
        let tail = series.tail(2);
        assert_eq!(tail.closes(), &[13.0, 14.0]);
        assert_eq!(series.tail(99).len(), 5);
    }

    #[test]
    fn recent_extremes_are_newest_first() {
        let series =
            CandleSeries::new((0..4).map(|h| candle_at(h, 10.0 + h as f64)).collect()).unwrap();
        let (highs, lows) = series.recent_extremes_newest_first(3);
        assert_eq!(highs, vec![14.0, 13.0, 12.0]);
        assert_eq!(lows, vec![12.0, 11.0, 10.0]);
    }

    #[test]
    fn empty_series_has_no_price() {
        let series = CandleSeries::new(Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.current_price(), None);
        assert_eq!(series.last_candle(), None);
        assert_eq!(series.price_range(), None);
    }

    #[test]
    fn price_range_spans_wicks() {
        let series =
            CandleSeries::new((0..4).map(|h| candle_at(h, 10.0 + h as f64)).collect()).unwrap();
        assert_eq!(series.price_range(), Some((9.0, 14.0)));
    }

    #[test]
    fn decoding_goes_through_validation() {
        let series =
            CandleSeries::new((0..3).map(|h| candle_at(h, 10.0 + h as f64)).collect()).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(serde_json::from_str::<CandleSeries>(&json).unwrap(), series);

        // backwards timestamps
        let backwards = vec![candle_at(2, 10.0), candle_at(1, 11.0)];
        let json = serde_json::to_string(&backwards).unwrap();
        assert!(serde_json::from_str::<CandleSeries>(&json).is_err());

        // column layout with mismatched lengths is not a series either
        let columns = r#"{"times":["1970-01-01T00:00:00Z","1970-01-01T01:00:00Z"],
            "open_prices":[1.0],"high_prices":[1.0],"low_prices":[1.0],
            "close_prices":[1.0,2.0],"volumes":[1.0]}"#;
        assert!(serde_json::from_str::<CandleSeries>(columns).is_err());
    }
}
