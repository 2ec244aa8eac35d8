use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use strum::IntoEnumIterator;

use level_sniper::data::CandleStoreFile;
use level_sniper::{Candle, CandleSeries, SeriesKey, Timeframe};

const DEMO_PAIRS: &[(&str, f64)] = &[("BTC/USD", 64_000.0), ("ETH/USD", 3_200.0), ("SOL/USD", 150.0)];
const DEMO_CANDLES: usize = 500;

fn main() -> Result<()> {
    build_demo_store()
}

fn build_demo_store() -> Result<()> {
    let mut series = Vec::new();
    for (symbol, base) in DEMO_PAIRS {
        for timeframe in Timeframe::iter() {
            let candles = synthetic_candles(*base, timeframe, DEMO_CANDLES);
            let data = CandleSeries::new(candles)
                .with_context(|| format!("Synthetic series for {} is invalid", symbol))?;
            if let Some((low, high)) = data.price_range() {
                println!("{}@{}: {} candles, {:.2} - {:.2}", symbol, timeframe, data.len(), low, high);
            }
            series.push((SeriesKey::new(*symbol, timeframe), data));
        }
    }

    let output = CandleStoreFile::new(series);
    let output_path = CandleStoreFile::default_path();
    output.save_to_path(&output_path)?;

    println!(
        "✅ Demo store written to {:?} with {} series.",
        output_path,
        output.series.len()
    );
    Ok(())
}

/// A slow sine swing with a faster ripple on top, so price keeps revisiting
/// the same zones and the level detector has something to find.
fn synthetic_candles(base: f64, timeframe: Timeframe, n: usize) -> Vec<Candle> {
    let start = DateTime::<Utc>::UNIX_EPOCH + Duration::days(19_000);
    let step = Duration::milliseconds(timeframe.interval_ms());

    (0..n)
        .map(|i| {
            let t = i as f64;
            let swing = (t / 40.0).sin() * 0.06 + (t / 7.0).sin() * 0.01;
            let close = base * (1.0 + swing);
            let open = base * (1.0 + (((t - 1.0) / 40.0).sin() * 0.06 + ((t - 1.0) / 7.0).sin() * 0.01));
            let wick = base * 0.004 * (1.0 + (t / 3.0).cos().abs());
            let volume = 1_000.0 * (1.0 + (t / 11.0).sin().abs());
            Candle::new(
                start + step * i as i32,
                open,
                open.max(close) + wick,
                open.min(close) - wick,
                close,
                volume,
            )
        })
        .collect()
}
