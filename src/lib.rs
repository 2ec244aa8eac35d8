#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Collaborator wiring
pub mod engine;

// Re-export commonly used types
pub use analysis::{analyse_batch, compute_indicators, detect_levels};
pub use config::{IndicatorParams, LevelParams, LevelSelection};
pub use data::{CandleStore, FileCandleStore, KeyValueCache, MemoryCache, MemoryCandleStore};
pub use domain::{Candle, SeriesKey, Timeframe};
pub use engine::SnapshotAssembler;
pub use error::{EngineError, EngineResult};
pub use models::{CandleSeries, IndicatorSnapshot, IndicatorResult, LevelDetectionResult, MarketSummary};
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

use config::ANALYSIS;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Trading pair, e.g. "BTC/USD"
    #[arg(long, default_value = "BTC/USD")]
    pub symbol: String,

    /// Candle width: 1m, 5m, 15m, 30m, 1h, 4h, 1d
    #[arg(long, default_value_t = Timeframe::OneHour)]
    pub timeframe: Timeframe,

    /// Candles fed to the indicator engine
    #[arg(long, default_value_t = ANALYSIS.default_candle_limit)]
    pub limit: usize,

    /// Candles scanned for support/resistance touches
    #[arg(long, default_value_t = ANALYSIS.levels.lookback_periods)]
    pub lookback: usize,

    /// Relative clustering tolerance (0.02 = 2%)
    #[arg(long, default_value_t = ANALYSIS.levels.sensitivity)]
    pub sensitivity: f64,

    /// Report the levels nearest the current price instead of the extremes
    #[arg(long, default_value_t = false)]
    pub nearest: bool,

    /// Candle store file (defaults to the standard store location)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

impl Cli {
    pub fn level_params(&self) -> LevelParams {
        LevelParams {
            lookback_periods: self.lookback,
            sensitivity: self.sensitivity,
            selection: if self.nearest {
                LevelSelection::NearestToPrice
            } else {
                LevelSelection::Extremes
            },
            ..LevelParams::default()
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(data::CandleStoreFile::default_path)
    }
}
