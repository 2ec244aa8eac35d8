use std::sync::Arc;

use chrono::Utc;

use crate::analysis::{build_liquidation_zones, compute_indicators, detect_levels, key_signals, market_bias};
#[cfg(debug_assertions)]
use crate::config::debug::{PRINT_CACHE_EVENTS, PRINT_INDICATORS_FOR_SYMBOL};
use crate::config::{
    ANALYSIS, CACHE, IndicatorParams, LevelParams, candles_cache_key, indicators_cache_key,
    levels_cache_key,
};
use crate::data::{CandleStore, KeyValueCache, NoCache, get_json, set_json};
use crate::domain::Timeframe;
use crate::error::{EngineError, EngineResult};
use crate::models::{CandleSeries, IndicatorResult, LevelDetectionResult, MarketSummary};

/// Wires the pure engine to its collaborators: fetch candles, consult the
/// cache, compute, write back.
///
/// Cache trouble never fails a request. A cache that cannot be reached is
/// treated as a miss and a rejected write is only logged. Store failures
/// surface as [`EngineError::UpstreamUnavailable`].
#[derive(Clone)]
pub struct SnapshotAssembler {
    store: Arc<dyn CandleStore>,
    cache: Arc<dyn KeyValueCache>,
}

impl SnapshotAssembler {
    pub fn new(store: Arc<dyn CandleStore>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self { store, cache }
    }

    pub fn without_cache(store: Arc<dyn CandleStore>) -> Self {
        Self::new(store, Arc::new(NoCache))
    }

    pub fn store_signature(&self) -> &'static str {
        self.store.signature()
    }

    pub fn cache_signature(&self) -> &'static str {
        self.cache.signature()
    }

    /// Most recent `limit` candles, from the cache when allowed.
    pub async fn load_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
        use_cache: bool,
    ) -> EngineResult<CandleSeries> {
        let key = candles_cache_key(symbol, timeframe, limit);

        if use_cache && let Some(series) = get_json::<CandleSeries>(self.cache.as_ref(), &key).await {
            log_cache_event("HIT", &key);
            return Ok(series);
        }
        if use_cache {
            log_cache_event("MISS", &key);
        }

        let series = self
            .store
            .fetch_candles(symbol, timeframe, limit)
            .await
            .map_err(|e| EngineError::upstream(self.store.signature(), e))?;

        if use_cache && !series.is_empty() {
            self.write_back(&key, &series, CACHE.ttl.candles_secs).await;
        }
        Ok(series)
    }

    /// Indicator snapshot for the most recent `limit` candles.
    ///
    /// The cache key only carries symbol, timeframe and limit, so requests
    /// with non-default windows always compute fresh and are not stored.
    pub async fn indicator_result(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
        params: &IndicatorParams,
        use_cache: bool,
    ) -> EngineResult<IndicatorResult> {
        let use_cache = use_cache && *params == IndicatorParams::default();
        let key = indicators_cache_key(symbol, timeframe, limit);

        if use_cache && let Some(hit) = get_json::<IndicatorResult>(self.cache.as_ref(), &key).await {
            log_cache_event("HIT", &key);
            return Ok(hit);
        }
        if use_cache {
            log_cache_event("MISS", &key);
        }

        let series = self.load_candles(symbol, timeframe, limit, use_cache).await?;
        let indicators = compute_indicators(&series, params);

        #[cfg(debug_assertions)]
        if !PRINT_INDICATORS_FOR_SYMBOL.is_empty() && PRINT_INDICATORS_FOR_SYMBOL == symbol {
            log::info!(
                "Indicators for {}@{} over {} candles: {:?}",
                symbol,
                timeframe,
                series.len(),
                indicators
            );
        }

        let result = IndicatorResult {
            market_bias: market_bias(&indicators),
            key_signals: key_signals(&indicators),
            indicators,
            timestamp: Utc::now(),
            symbol: symbol.to_string(),
            timeframe,
        };

        if use_cache {
            self.write_back(&key, &result, CACHE.ttl.indicators_secs).await;
        }
        Ok(result)
    }

    /// Support/resistance levels over the last `lookback_periods` candles,
    /// classified against the latest close. An empty series reports a
    /// current price of 0 and no levels.
    pub async fn level_result(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        params: &LevelParams,
        use_cache: bool,
    ) -> EngineResult<LevelDetectionResult> {
        let defaults = LevelParams::default();
        // max_levels and selection are not part of the key
        let use_cache = use_cache
            && params.max_levels == defaults.max_levels
            && params.selection == defaults.selection;
        let lookback = params.lookback_periods.min(ANALYSIS.max_lookback_periods);
        let key = levels_cache_key(symbol, timeframe, lookback, params.sensitivity);

        if use_cache
            && let Some(hit) = get_json::<LevelDetectionResult>(self.cache.as_ref(), &key).await
        {
            log_cache_event("HIT", &key);
            return Ok(hit);
        }
        if use_cache {
            log_cache_event("MISS", &key);
        }

        let series = self.load_candles(symbol, timeframe, lookback, use_cache).await?;
        let current_price = series.current_price().unwrap_or(0.0);
        let levels = detect_levels(&series, params, current_price);
        let liquidation_zones = build_liquidation_zones(&levels, params.sensitivity);

        let result = LevelDetectionResult {
            support_levels: levels.support_levels,
            resistance_levels: levels.resistance_levels,
            liquidation_zones,
            current_price,
            timestamp: Utc::now(),
        };

        if use_cache {
            self.write_back(&key, &result, CACHE.ttl.levels_secs).await;
        }
        Ok(result)
    }

    /// Indicators and levels for one series, computed concurrently.
    pub async fn market_summary(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
        indicator_params: &IndicatorParams,
        level_params: &LevelParams,
        use_cache: bool,
    ) -> EngineResult<MarketSummary> {
        let (indicators, levels) = futures::join!(
            self.indicator_result(symbol, timeframe, limit, indicator_params, use_cache),
            self.level_result(symbol, timeframe, level_params, use_cache),
        );
        let (indicators, levels) = (indicators?, levels?);

        let current_price = (levels.current_price > 0.0).then_some(levels.current_price);
        Ok(MarketSummary {
            symbol: symbol.to_string(),
            timeframe,
            current_price,
            indicators,
            levels,
            timestamp: Utc::now(),
        })
    }

    async fn write_back<T: serde::Serialize + Sync>(&self, key: &str, value: &T, ttl_secs: u64) {
        if !set_json(self.cache.as_ref(), key, value, ttl_secs).await {
            log::debug!("Cache write skipped for {} ({})", key, self.cache.signature());
        }
    }
}

#[allow(unused_variables)]
fn log_cache_event(event: &str, key: &str) {
    #[cfg(debug_assertions)]
    if PRINT_CACHE_EVENTS {
        log::info!("[CACHE {}] {}", event, key);
    }
}
