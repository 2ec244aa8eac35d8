use crate::config::ANALYSIS;
use crate::models::indicators::{
    IndicatorSnapshot, MacdSignal, MarketBias, RsiSignal, Trend, VolumeConviction,
};

/// Majority vote over RSI, MACD and trend. Ties (including "no data") are neutral.
///
/// RSI votes with the wider 40/60 band: a reading below 40 counts as
/// bullish (room to run), above 60 as bearish.
pub fn market_bias(snapshot: &IndicatorSnapshot) -> MarketBias {
    let mut bullish = 0u8;
    let mut bearish = 0u8;

    if let Some(rsi) = snapshot.rsi {
        if rsi < ANALYSIS.bias.rsi_bullish_below {
            bullish += 1;
        } else if rsi > ANALYSIS.bias.rsi_bearish_above {
            bearish += 1;
        }
    }

    match snapshot.macd_signal {
        Some(MacdSignal::Bullish) => bullish += 1,
        Some(MacdSignal::Bearish) => bearish += 1,
        _ => {}
    }

    match snapshot.trend {
        Some(Trend::Uptrend) => bullish += 1,
        Some(Trend::Downtrend) => bearish += 1,
        _ => {}
    }

    match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => MarketBias::Bullish,
        std::cmp::Ordering::Less => MarketBias::Bearish,
        std::cmp::Ordering::Equal => MarketBias::Neutral,
    }
}

/// Short human-readable observations, most important first.
pub fn key_signals(snapshot: &IndicatorSnapshot) -> Vec<String> {
    let mut signals = Vec::new();

    if let (Some(rsi), Some(signal)) = (snapshot.rsi, snapshot.rsi_signal) {
        match signal {
            RsiSignal::Oversold => {
                signals.push(format!("RSI oversold at {:.1} - potential bounce", rsi))
            }
            RsiSignal::Overbought => {
                signals.push(format!("RSI overbought at {:.1} - potential pullback", rsi))
            }
            RsiSignal::Neutral => {}
        }
    }

    if let Some(signal) = snapshot.macd_signal {
        signals.push(format!("MACD showing {} momentum", signal));
    }

    if let Some(momentum) = snapshot.histogram_momentum {
        signals.push(format!("MACD histogram {}", momentum));
    }

    if let Some(trend) = snapshot.trend {
        signals.push(format!("Price action indicates {}", trend));
    }

    if let (Some(ratio), Some(VolumeConviction::Strong)) =
        (snapshot.volume_ratio, snapshot.volume_conviction)
    {
        signals.push(format!("High volume confirmation ({:.1}x)", ratio));
    }

    if signals.is_empty() {
        signals.push("Mixed signals - wait for clearer setup".to_string());
    }

    signals
}
