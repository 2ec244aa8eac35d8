use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_STORE_IO;
use crate::config::{STORE_PATH, STORE_VERSION, candle_store_filename};
use crate::data::store::CandleStore;
use crate::domain::{SeriesKey, Timeframe};
use crate::models::CandleSeries;
#[cfg(debug_assertions)]
use crate::utils::time_utils::{epoch_ms_to_utc, how_many_seconds_ago};

/// On-disk snapshot of every stored series.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CandleStoreFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub series: Vec<(SeriesKey, CandleSeries)>,
}

impl CandleStoreFile {
    pub fn new(series: Vec<(SeriesKey, CandleSeries)>) -> Self {
        Self {
            version: STORE_VERSION,
            timestamp_ms: Utc::now().timestamp_millis(),
            series,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).context(format!("Failed to open candle store: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let store: Self = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize candle store: {:?}", path))?;

        if store.version != STORE_VERSION {
            bail!(
                "Candle store version mismatch: file v{} vs required v{}",
                store.version,
                STORE_VERSION
            );
        }
        Ok(store)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize candle store to: {}", path.display()))
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(STORE_PATH).join(candle_store_filename())
    }

    pub fn find(&self, key: &SeriesKey) -> Option<&CandleSeries> {
        self.series.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }
}

/// Candle store backed by a bincode file. The file is re-read on each fetch,
/// so an external writer refreshing it is picked up without a restart.
pub struct FileCandleStore {
    pub path: PathBuf,
}

impl FileCandleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileCandleStore {
    fn default() -> Self {
        Self::new(CandleStoreFile::default_path())
    }
}

#[async_trait]
impl CandleStore for FileCandleStore {
    fn signature(&self) -> &'static str {
        "Local File Store"
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries> {
        let full_path = self.path.clone();

        #[cfg(debug_assertions)]
        let start_time = PRINT_STORE_IO.then(|| {
            log::info!("Reading candle store from: {:?}...", full_path);
            std::time::Instant::now()
        });

        let store = tokio::task::spawn_blocking(move || CandleStoreFile::load_from_path(&full_path))
            .await
            .context("Deserialization task panicked")?
            .context("Failed to load candle store")?;

        #[cfg(debug_assertions)]
        if let Some(start) = start_time {
            log::info!(
                "Candle store loaded: {} series in {:.2}s (written {}, {}s ago)",
                store.series.len(),
                start.elapsed().as_secs_f64(),
                epoch_ms_to_utc(store.timestamp_ms),
                how_many_seconds_ago(store.timestamp_ms)
            );
        }

        let key = SeriesKey::new(symbol, timeframe);
        Ok(store
            .find(&key)
            .map(|series| series.tail(limit))
            .unwrap_or_default())
    }
}
