use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// RSI zone under the 30/70 rule.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RsiSignal {
    Oversold,
    Neutral,
    Overbought,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MacdSignal {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarketBias {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Whether the MACD histogram is growing or shrinking in magnitude.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HistogramMomentum {
    Expanding,
    Contracting,
    Flat,
}

/// Volume ratio bucket: > 1.5x strong, < 0.5x weak.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VolumeConviction {
    Strong,
    Normal,
    Weak,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MacdValues {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// Latest indicator values for one candle series.
///
/// Every field is optional: a field is `None` whenever the series is shorter
/// than that indicator's minimum window. An empty series produces
/// `IndicatorSnapshot::default()`.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub rsi_signal: Option<RsiSignal>,
    /// Needs `ema_slow + macd_signal_period - 1` closes (34 with defaults).
    pub macd: Option<MacdValues>,
    pub macd_signal: Option<MacdSignal>,
    pub histogram_momentum: Option<HistogramMomentum>,
    pub ema_20: Option<f64>,
    pub ema_50: Option<f64>,
    pub trend: Option<Trend>,
    pub volume_ratio: Option<f64>,
    pub volume_conviction: Option<VolumeConviction>,
}

impl IndicatorSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == IndicatorSnapshot::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&RsiSignal::Overbought).unwrap(), "\"overbought\"");
        assert_eq!(Trend::Sideways.to_string(), "sideways");
        assert_eq!(MarketBias::default(), MarketBias::Neutral);
    }

    #[test]
    fn default_snapshot_is_empty() {
        let snapshot = IndicatorSnapshot::default();
        assert!(snapshot.is_empty());

        let partial = IndicatorSnapshot {
            volume_ratio: Some(1.0),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let snapshot: IndicatorSnapshot = serde_json::from_str(r#"{"rsi": 55.0}"#).unwrap();
        assert_eq!(snapshot.rsi, Some(55.0));
        assert_eq!(snapshot.macd, None);
    }
}
