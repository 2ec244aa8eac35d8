use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::data::store::CandleStore;
use crate::domain::{SeriesKey, Timeframe};
use crate::models::CandleSeries;

/// In-process store. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryCandleStore {
    series: Arc<RwLock<HashMap<SeriesKey, CandleSeries>>>,
}

impl MemoryCandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored series for `key`.
    pub fn insert(&self, key: SeriesKey, series: CandleSeries) -> Result<()> {
        let mut map = self
            .series
            .write()
            .map_err(|_| anyhow!("memory candle store lock poisoned"))?;
        map.insert(key, series);
        Ok(())
    }

    pub fn keys(&self) -> Vec<SeriesKey> {
        self.series
            .read()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl From<Vec<(SeriesKey, CandleSeries)>> for MemoryCandleStore {
    fn from(entries: Vec<(SeriesKey, CandleSeries)>) -> Self {
        Self {
            series: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }
}

#[async_trait]
impl CandleStore for MemoryCandleStore {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries> {
        let map = self
            .series
            .read()
            .map_err(|_| anyhow!("memory candle store lock poisoned"))?;
        let key = SeriesKey::new(symbol, timeframe);
        Ok(map
            .get(&key)
            .map(|series| series.tail(limit))
            .unwrap_or_default())
    }

    fn signature(&self) -> &'static str {
        "Memory Store"
    }
}
