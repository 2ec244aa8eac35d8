use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::utils::TimeUtils;

/// Candle bucket width supported by the store.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Debug,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Timeframe {
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    OneMinute,
    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    FiveMinutes,
    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[strum(serialize = "30m")]
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[default]
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,
    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    FourHours,
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,
}

impl Timeframe {
    pub fn interval_ms(&self) -> i64 {
        match self {
            Timeframe::OneMinute => TimeUtils::MS_IN_MIN,
            Timeframe::FiveMinutes => TimeUtils::MS_IN_5_MIN,
            Timeframe::FifteenMinutes => TimeUtils::MS_IN_15_MIN,
            Timeframe::ThirtyMinutes => TimeUtils::MS_IN_30_MIN,
            Timeframe::OneHour => TimeUtils::MS_IN_H,
            Timeframe::FourHours => TimeUtils::MS_IN_4_H,
            Timeframe::OneDay => TimeUtils::MS_IN_D,
        }
    }
}
