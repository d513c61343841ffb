//! Browser-local persistence for session continuity.
//!
//! Thin glue over `window.localStorage` on wasm32; a process-wide map
//! stands in elsewhere so the snapshot logic stays testable natively.
//! Values are JSON with no schema versioning - anything that fails to
//! parse is discarded rather than surfaced.
//!
//! Stored keys: the last search term and its results (so a reload or a
//! detail-page round trip lands back on the same grid), the recent-search
//! list for the input's suggestions, and the BaaS session secret.

use marquee_core::omdb::Movie;
use serde::de::DeserializeOwned;
use serde::Serialize;

const LAST_SEARCH_TERM_KEY: &str = "marquee.last_search_term";
const SEARCH_RESULTS_KEY: &str = "marquee.search_results";
const HAS_SEARCHED_KEY: &str = "marquee.has_searched";
const RECENT_SEARCHES_KEY: &str = "marquee.recent_searches";
const SESSION_SECRET_KEY: &str = "marquee.session_secret";
const THEME_KEY: &str = "marquee.theme";

#[cfg(target_arch = "wasm32")]
fn raw_get(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn raw_set(key: &str, value: &str) {
    if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
        // Quota or privacy-mode failures are not actionable; drop silently.
        let _ = storage.set_item(key, value);
    }
}

#[cfg(target_arch = "wasm32")]
fn raw_remove(key: &str) {
    if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use once_cell::sync::Lazy;
    use std::collections::HashMap;
    use std::sync::Mutex;

    static MAP: Lazy<Mutex<HashMap<String, String>>> = Lazy::new(|| Mutex::new(HashMap::new()));

    pub fn raw_get(key: &str) -> Option<String> {
        MAP.lock().expect("storage lock poisoned").get(key).cloned()
    }

    pub fn raw_set(key: &str, value: &str) {
        MAP.lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw_remove(key: &str) {
        MAP.lock().expect("storage lock poisoned").remove(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
use native::{raw_get, raw_remove, raw_set};

fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = raw_get(key)?;
    serde_json::from_str(&raw).ok()
}

fn set_json<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        raw_set(key, &json);
    }
}

// --- Session secret ---

pub fn load_session_secret() -> Option<String> {
    raw_get(SESSION_SECRET_KEY).filter(|secret| !secret.is_empty())
}

pub fn save_session_secret(secret: &str) {
    raw_set(SESSION_SECRET_KEY, secret);
}

pub fn clear_session_secret() {
    raw_remove(SESSION_SECRET_KEY);
}

// --- Theme preference ---

/// Stored theme name, `"dark"` or `"light"`.
pub fn load_theme() -> Option<String> {
    raw_get(THEME_KEY)
}

pub fn save_theme(theme: &str) {
    raw_set(THEME_KEY, theme);
}

// --- Search snapshot ---

pub fn load_last_search_term() -> Option<String> {
    raw_get(LAST_SEARCH_TERM_KEY).filter(|term| !term.is_empty())
}

pub fn load_cached_results() -> Vec<Movie> {
    get_json(SEARCH_RESULTS_KEY).unwrap_or_default()
}

pub fn load_has_searched() -> bool {
    raw_get(HAS_SEARCHED_KEY).as_deref() == Some("true")
}

/// Persists a successful search so a reload restores the same grid.
/// A zero-result search clears the cached grid: the term and the results
/// must never disagree after a reload.
pub fn save_search_snapshot(term: &str, results: &[Movie]) {
    raw_set(LAST_SEARCH_TERM_KEY, term);
    raw_set(HAS_SEARCHED_KEY, "true");
    if results.is_empty() {
        raw_remove(SEARCH_RESULTS_KEY);
    } else {
        set_json(SEARCH_RESULTS_KEY, &results);
    }
}

pub fn clear_search_snapshot() {
    raw_remove(LAST_SEARCH_TERM_KEY);
    raw_remove(SEARCH_RESULTS_KEY);
    raw_remove(HAS_SEARCHED_KEY);
}

// --- Recent searches ---

pub fn load_recent_searches() -> Vec<String> {
    get_json(RECENT_SEARCHES_KEY).unwrap_or_default()
}

pub fn save_recent_searches(searches: &[String]) {
    set_json(RECENT_SEARCHES_KEY, &searches);
}

pub fn clear_recent_searches() {
    raw_remove(RECENT_SEARCHES_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(imdb_id: &str) -> Movie {
        Movie {
            imdb_id: imdb_id.to_string(),
            title: "Arrival".to_string(),
            year: "2016".to_string(),
            poster: None,
            media_type: "movie".to_string(),
        }
    }

    #[test]
    fn test_search_snapshot_round_trip() {
        let results = vec![movie("tt2543164"), movie("tt0133093")];
        save_search_snapshot("arrival", &results);

        assert_eq!(load_last_search_term().as_deref(), Some("arrival"));
        assert_eq!(load_cached_results(), results);
        assert!(load_has_searched());

        // A later zero-result search must not leave the old grid behind.
        save_search_snapshot("zzzzz", &[]);
        assert_eq!(load_last_search_term().as_deref(), Some("zzzzz"));
        assert!(load_cached_results().is_empty());
        assert!(load_has_searched());

        clear_search_snapshot();
        assert_eq!(load_last_search_term(), None);
        assert!(load_cached_results().is_empty());
        assert!(!load_has_searched());
    }

    #[test]
    fn test_theme_preference_round_trip() {
        assert_eq!(load_theme(), None);
        save_theme("light");
        assert_eq!(load_theme().as_deref(), Some("light"));
        save_theme("dark");
        assert_eq!(load_theme().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_json_is_discarded() {
        raw_set(RECENT_SEARCHES_KEY, "{not json");
        assert!(load_recent_searches().is_empty());
        clear_recent_searches();
    }

    #[test]
    fn test_session_secret_round_trip() {
        save_session_secret("s3cret");
        assert_eq!(load_session_secret().as_deref(), Some("s3cret"));
        clear_session_secret();
        assert_eq!(load_session_secret(), None);
    }
}
