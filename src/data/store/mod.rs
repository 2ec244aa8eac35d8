//! Persistence collaborator: where candle sequences come from.

pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::Timeframe;
use crate::models::CandleSeries;

pub use file::{CandleStoreFile, FileCandleStore};
pub use memory::MemoryCandleStore;

#[async_trait]
pub trait CandleStore: Send + Sync {
    /// The most recent `limit` candles for the series, oldest first.
    /// An unknown series is an empty sequence, not an error.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}
