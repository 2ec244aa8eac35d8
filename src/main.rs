use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;

use level_sniper::{Cli, FileCandleStore, IndicatorParams, MemoryCache, SnapshotAssembler};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Wire collaborators
    let store_path = args.store_path();
    let assembler = SnapshotAssembler::new(
        Arc::new(FileCandleStore::new(&store_path)),
        Arc::new(MemoryCache::new()),
    );
    log::info!(
        "Analysing {}@{} from {:?} ({}, {})",
        args.symbol,
        args.timeframe,
        store_path,
        assembler.store_signature(),
        assembler.cache_signature()
    );

    // D. Run
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let summary = rt
        .block_on(assembler.market_summary(
            &args.symbol,
            args.timeframe,
            args.limit,
            &IndicatorParams::default(),
            &args.level_params(),
            true,
        ))
        .with_context(|| format!("Failed to analyse {}@{}", args.symbol, args.timeframe))?;

    if summary.current_price.is_none() {
        log::warn!("No candles stored for {}@{}", args.symbol, args.timeframe);
    }

    // E. Report
    let json = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
    println!("{}", json);
    Ok(())
}
