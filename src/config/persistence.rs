//! File persistence and serialization configuration

/// Directory path for storing candle snapshots
pub const STORE_PATH: &str = "candle_data";

/// Base filename for candle store files (without extension)
pub const STORE_FILENAME_WITHOUT_EXT: &str = "candles";

/// Current version of the candle store serialization format
pub const STORE_VERSION: f64 = 1.0;

/// Example: "candles_v1.bin"
pub fn candle_store_filename() -> String {
    format!("{}_v{}.bin", STORE_FILENAME_WITHOUT_EXT, STORE_VERSION)
}
