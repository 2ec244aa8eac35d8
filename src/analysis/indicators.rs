//! Momentum and trend indicators over a chronological candle sequence.
//!
//! Every function here is pure. Recurrences (RSI, EMA, MACD) are evaluated
//! strictly in time order; a series shorter than an indicator's window yields
//! `None` / an empty vector for that indicator instead of an error.

use crate::config::{ANALYSIS, IndicatorParams};
use crate::error::{EngineError, EngineResult};
use crate::models::CandleSeries;
use crate::models::indicators::{
    HistogramMomentum, IndicatorSnapshot, MacdSignal, MacdValues, RsiSignal, Trend,
    VolumeConviction,
};
use crate::utils::maths_utils::mean;

/// Parallel OHLCV columns fed to the engine. All four must share one length.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorArrays<'a> {
    pub closes: &'a [f64],
    pub highs: &'a [f64],
    pub lows: &'a [f64],
    pub volumes: &'a [f64],
}

impl<'a> IndicatorArrays<'a> {
    pub fn new(
        closes: &'a [f64],
        highs: &'a [f64],
        lows: &'a [f64],
        volumes: &'a [f64],
    ) -> EngineResult<Self> {
        let n = closes.len();
        if highs.len() != n || lows.len() != n || volumes.len() != n {
            return Err(EngineError::LengthMismatch {
                closes: n,
                highs: highs.len(),
                lows: lows.len(),
                volumes: volumes.len(),
            });
        }
        Ok(Self {
            closes,
            highs,
            lows,
            volumes,
        })
    }

    pub fn from_series(series: &'a CandleSeries) -> Self {
        // CandleSeries keeps its columns the same length by construction
        Self {
            closes: series.closes(),
            highs: series.highs(),
            lows: series.lows(),
            volumes: series.volumes(),
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// Compute the full snapshot for a validated series.
pub fn compute_indicators(series: &CandleSeries, params: &IndicatorParams) -> IndicatorSnapshot {
    compute_indicators_from_arrays(&IndicatorArrays::from_series(series), params)
}

pub fn compute_indicators_from_arrays(
    arrays: &IndicatorArrays,
    params: &IndicatorParams,
) -> IndicatorSnapshot {
    let closes = arrays.closes;
    let Some(&current_close) = closes.last() else {
        return IndicatorSnapshot::default();
    };

    let rsi_value = rsi(closes, params.rsi_period);

    let macd_values = macd(
        closes,
        params.ema_fast,
        params.ema_slow,
        params.macd_signal_period,
    );
    let macd_latest = macd_values.as_ref().and_then(MacdSeries::latest);

    let ema_short = ema(closes, params.ema_short);
    let ema_long = ema(closes, params.ema_long);

    let volume_ratio = volume_ratio(arrays.volumes, params.volume_window);

    IndicatorSnapshot {
        rsi: rsi_value,
        rsi_signal: rsi_value.map(rsi_signal),
        macd: macd_latest,
        macd_signal: macd_latest.map(|m| macd_signal(m.macd_line, m.signal_line)),
        histogram_momentum: macd_values.as_ref().and_then(MacdSeries::histogram_momentum),
        ema_20: ema_short,
        ema_50: ema_long,
        trend: match (ema_short, ema_long) {
            (Some(short), Some(long)) => Some(trend(current_close, short, long)),
            _ => None,
        },
        volume_ratio,
        volume_conviction: volume_ratio.map(volume_conviction),
    }
}

// ============================================================================
// RSI
// ============================================================================

/// RSI values with Wilder smoothing. Element `j` corresponds to close index
/// `period + j`; the result is empty when `closes.len() <= period`.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let p = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / p;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / p;

    let mut values = Vec::with_capacity(closes.len() - period);
    values.push(rsi_from_averages(avg_gain, avg_loss));

    // avg[i] uses the delta ending at close i, i.e. deltas[i - 1]
    for i in (period + 1)..closes.len() {
        avg_gain = (avg_gain * (p - 1.0) + gains[i - 1]) / p;
        avg_loss = (avg_loss * (p - 1.0) + losses[i - 1]) / p;
        values.push(rsi_from_averages(avg_gain, avg_loss));
    }

    values
}

/// Latest RSI, or `None` with fewer than `period + 1` closes.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    rsi_series(closes, period).last().copied()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = avg_gain / (avg_loss + ANALYSIS.rsi.epsilon);
    100.0 - 100.0 / (1.0 + rs)
}

pub fn rsi_signal(rsi: f64) -> RsiSignal {
    if rsi >= ANALYSIS.rsi.overbought {
        RsiSignal::Overbought
    } else if rsi <= ANALYSIS.rsi.oversold {
        RsiSignal::Oversold
    } else {
        RsiSignal::Neutral
    }
}

// ============================================================================
// EMA
// ============================================================================

/// EMA seeded with the SMA of the first `period` values. Element `j`
/// corresponds to input index `period - 1 + j`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);
    let mut prev = seed;
    for &value in &values[period..] {
        prev = (value - prev) * multiplier + prev;
        out.push(prev);
    }
    out
}

pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied()
}

// ============================================================================
// MACD
// ============================================================================

/// MACD line, signal line and histogram, aligned so that the last element of
/// each refers to the latest close.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn latest(&self) -> Option<MacdValues> {
        Some(MacdValues {
            macd_line: *self.macd_line.last()?,
            signal_line: *self.signal_line.last()?,
            histogram: *self.histogram.last()?,
        })
    }

    /// Compares the magnitude of the last two histogram bars.
    pub fn histogram_momentum(&self) -> Option<HistogramMomentum> {
        let [.., prev, last] = self.histogram.as_slice() else {
            return None;
        };
        let (prev, last) = (prev.abs(), last.abs());
        Some(if last > prev {
            HistogramMomentum::Expanding
        } else if last < prev {
            HistogramMomentum::Contracting
        } else {
            HistogramMomentum::Flat
        })
    }
}

/// The MACD line exists only where both EMAs do, i.e. from index
/// `max(fast, slow) - 1`; the signal EMA runs over that line. Returns `None`
/// until at least one signal value exists.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Option<MacdSeries> {
    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);
    if fast_ema.is_empty() || slow_ema.is_empty() {
        return None;
    }

    // Both series end at the latest close, so align them from the back.
    let line_len = fast_ema.len().min(slow_ema.len());
    let macd_line: Vec<f64> = fast_ema[fast_ema.len() - line_len..]
        .iter()
        .zip(&slow_ema[slow_ema.len() - line_len..])
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema_series(&macd_line, signal);
    if signal_line.is_empty() {
        return None;
    }

    let offset = macd_line.len() - signal_line.len();
    let histogram = macd_line[offset..]
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Some(MacdSeries {
        macd_line,
        signal_line,
        histogram,
    })
}

pub fn macd_signal(macd_line: f64, signal_line: f64) -> MacdSignal {
    if macd_line > signal_line {
        MacdSignal::Bullish
    } else if macd_line < signal_line {
        MacdSignal::Bearish
    } else {
        MacdSignal::Neutral
    }
}

// ============================================================================
// Trend & volume
// ============================================================================

pub fn trend(close: f64, ema_short: f64, ema_long: f64) -> Trend {
    if close > ema_short && ema_short > ema_long {
        Trend::Uptrend
    } else if close < ema_short && ema_short < ema_long {
        Trend::Downtrend
    } else {
        Trend::Sideways
    }
}

/// Current volume over the mean of the last `window` volumes (fewer if the
/// series is shorter). A zero mean reports a neutral 1.0.
pub fn volume_ratio(volumes: &[f64], window: usize) -> Option<f64> {
    if window == 0 {
        return None;
    }
    let current = *volumes.last()?;
    let start = volumes.len().saturating_sub(window);
    let avg = mean(&volumes[start..])?;
    if avg > 0.0 {
        Some(current / avg)
    } else {
        Some(1.0)
    }
}

pub fn volume_conviction(ratio: f64) -> VolumeConviction {
    if ratio > ANALYSIS.bias.high_volume_ratio {
        VolumeConviction::Strong
    } else if ratio < ANALYSIS.bias.low_volume_ratio {
        VolumeConviction::Weak
    } else {
        VolumeConviction::Normal
    }
}
