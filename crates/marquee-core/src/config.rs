//! Build-time configuration for external services.
//!
//! Marquee ships as a static web bundle, so there is no process environment
//! at runtime: endpoints and API keys are baked in at compile time through
//! `MARQUEE_*` environment variables, the same deployment model as a
//! bundler's `.env` file. Native builds (desktop shell, integration tests)
//! additionally honor the same variables at runtime, which takes precedence
//! over the compile-time value.

use crate::error::ConfigError;

/// Default base URL for the movie database API.
pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Movie database API settings (OMDB-compatible).
#[derive(Debug, Clone, PartialEq)]
pub struct OmdbConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Backend-as-a-service settings (Appwrite-compatible REST API).
#[derive(Debug, Clone, PartialEq)]
pub struct BaasConfig {
    /// API endpoint, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub watchlist_collection_id: String,
    pub search_history_collection_id: String,
    pub trending_collection_id: String,
}

/// Complete application configuration, validated once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub omdb: OmdbConfig,
    pub baas: BaasConfig,
}

/// Resolve one setting: runtime environment on native builds, then the
/// value captured at compile time.
fn resolve(name: &'static str, compile_time: Option<&'static str>) -> Option<String> {
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(value) = std::env::var(name) {
        if !value.is_empty() {
            return Some(value);
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = name;

    compile_time
        .map(str::to_string)
        .filter(|value| !value.is_empty())
}

impl AppConfig {
    /// Assemble the configuration from `MARQUEE_*` variables.
    ///
    /// The movie API key, BaaS endpoint, and BaaS project id are required;
    /// database and collection ids fall back to the development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let omdb = OmdbConfig {
            base_url: resolve("MARQUEE_OMDB_BASE_URL", option_env!("MARQUEE_OMDB_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_OMDB_BASE_URL.to_string()),
            api_key: resolve("MARQUEE_OMDB_API_KEY", option_env!("MARQUEE_OMDB_API_KEY"))
                .ok_or(ConfigError::Missing("MARQUEE_OMDB_API_KEY"))?,
        };

        let baas = BaasConfig {
            endpoint: resolve("MARQUEE_BAAS_ENDPOINT", option_env!("MARQUEE_BAAS_ENDPOINT"))
                .ok_or(ConfigError::Missing("MARQUEE_BAAS_ENDPOINT"))?,
            project_id: resolve("MARQUEE_BAAS_PROJECT_ID", option_env!("MARQUEE_BAAS_PROJECT_ID"))
                .ok_or(ConfigError::Missing("MARQUEE_BAAS_PROJECT_ID"))?,
            database_id: resolve("MARQUEE_BAAS_DATABASE_ID", option_env!("MARQUEE_BAAS_DATABASE_ID"))
                .unwrap_or_else(|| "marquee".to_string()),
            watchlist_collection_id: resolve(
                "MARQUEE_BAAS_WATCHLIST_COLLECTION_ID",
                option_env!("MARQUEE_BAAS_WATCHLIST_COLLECTION_ID"),
            )
            .unwrap_or_else(|| "watchlist".to_string()),
            search_history_collection_id: resolve(
                "MARQUEE_BAAS_SEARCH_HISTORY_COLLECTION_ID",
                option_env!("MARQUEE_BAAS_SEARCH_HISTORY_COLLECTION_ID"),
            )
            .unwrap_or_else(|| "search_history".to_string()),
            trending_collection_id: resolve(
                "MARQUEE_BAAS_TRENDING_COLLECTION_ID",
                option_env!("MARQUEE_BAAS_TRENDING_COLLECTION_ID"),
            )
            .unwrap_or_else(|| "trending_movies".to_string()),
        };

        Ok(Self { omdb, baas })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_skips_empty_values() {
        assert_eq!(resolve("MARQUEE_TEST_UNSET_VAR", Some("")), None);
        assert_eq!(
            resolve("MARQUEE_TEST_UNSET_VAR", Some("value")),
            Some("value".to_string())
        );
        assert_eq!(resolve("MARQUEE_TEST_UNSET_VAR", None), None);
    }
}
