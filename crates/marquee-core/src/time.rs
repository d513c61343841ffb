//! Cross-platform Unix timestamps.
//!
//! `std::time::SystemTime` panics on wasm32; the `instant` crate maps it to
//! `Date.now()` in the browser and re-exports the std type elsewhere.

/// Current Unix time in seconds. Returns 0 if the clock is unavailable.
pub fn unix_now() -> u64 {
    instant::SystemTime::now()
        .duration_since(instant::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
