//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so
//! release builds remain quiet. All of them are additionally gated by
//! `cfg(debug_assertions)` at the call site.

/// Emit cache hit/miss diagnostics from the snapshot assembler.
pub const PRINT_CACHE_EVENTS: bool = false;

/// Emit candle store load/save timings and sizes.
pub const PRINT_STORE_IO: bool = false;

/// Emit per-cluster detail (key, average, member count) during level detection.
pub const PRINT_CLUSTERS: bool = false;

/// If non-empty, emit indicator values only for this symbol.
/// Example: "BTC/USD". Use "" to disable.
pub const PRINT_INDICATORS_FOR_SYMBOL: &str = "";
