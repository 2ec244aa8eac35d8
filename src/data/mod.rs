// Collaborators: candle persistence and the snapshot cache
pub mod cache;
pub mod store;

// Re-export commonly used types
pub use cache::{KeyValueCache, MemoryCache, NoCache, get_json, set_json};
pub use store::{CandleStore, CandleStoreFile, FileCandleStore, MemoryCandleStore};
