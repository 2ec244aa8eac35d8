// Monotonic clock used by the in-memory cache for TTL bookkeeping.

pub type AppInstant = web_time::Instant;

pub fn now() -> AppInstant {
    web_time::Instant::now()
}
