//! Client for the OMDB-compatible movie database API.
//!
//! Two operations: title search (`?s=<term>`) and full detail lookup
//! (`?i=<imdb id>&plot=full`). The API signals failure in-band through a
//! `Response: "False"` flag, so the HTTP status alone is not enough to
//! classify a response; every body is checked before decoding.
//!
//! reqwest works on both native and WASM targets - in the browser it is
//! backed by `fetch()`.

mod types;

pub use types::{Movie, MovieDetail, Rating};

use crate::config::OmdbConfig;
use crate::error::ApiError;
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::debug;

use types::SearchPayload;

/// Shared HTTP client; reqwest pools connections per host internally.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    let builder = reqwest::Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .user_agent("Marquee/0.1.0 (movie discovery)")
        .timeout(std::time::Duration::from_secs(30));
    builder.build().expect("Failed to build HTTP client")
});

/// Searches the movie database by title.
///
/// Empty or whitespace-only queries are rejected without a network call.
/// An in-band API failure ("Movie not found!", "Too many results.") maps
/// to [`ApiError::Api`] carrying the service's message.
pub async fn search_movies(config: &OmdbConfig, query: &str) -> Result<Vec<Movie>, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidQuery("empty search term".into()));
    }

    let value = get_json(
        &config.base_url,
        &[("apikey", config.api_key.as_str()), ("s", query)],
    )
    .await?;
    let value = into_api_result(value)?;

    let payload: SearchPayload =
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
    debug!(results = payload.search.len(), "movie search completed");
    Ok(payload.search)
}

/// Fetches the full detail record for one movie, plot included.
pub async fn fetch_movie_detail(
    config: &OmdbConfig,
    imdb_id: &str,
) -> Result<MovieDetail, ApiError> {
    let imdb_id = imdb_id.trim();
    if imdb_id.is_empty() {
        return Err(ApiError::InvalidQuery("empty imdb id".into()));
    }

    let value = get_json(
        &config.base_url,
        &[
            ("apikey", config.api_key.as_str()),
            ("i", imdb_id),
            ("plot", "full"),
        ],
    )
    .await?;
    let value = into_api_result(value)?;

    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_json(base_url: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
    let response = HTTP_CLIENT.get(base_url).query(params).send().await?;
    Ok(response.json::<Value>().await?)
}

/// Maps the in-band `Response: "False"` failure flag to an error.
fn into_api_result(value: Value) -> Result<Value, ApiError> {
    let flag = value
        .get("Response")
        .and_then(Value::as_str)
        .unwrap_or("True");
    if flag.eq_ignore_ascii_case("false") {
        let message = value
            .get("Error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown API error")
            .to_string();
        return Err(ApiError::Api(message));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_false_response_maps_to_api_error() {
        let body = json!({"Response": "False", "Error": "Movie not found!"});
        match into_api_result(body) {
            Err(ApiError::Api(message)) => assert_eq!(message, "Movie not found!"),
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    #[test]
    fn test_false_response_without_message_still_errors() {
        let body = json!({"Response": "False"});
        assert!(matches!(into_api_result(body), Err(ApiError::Api(_))));
    }

    #[test]
    fn test_true_response_passes_through() {
        let body = json!({"Response": "True", "Search": []});
        assert!(into_api_result(body).is_ok());
    }

    #[test]
    fn test_search_payload_decodes_result_list() {
        let body = json!({
            "Response": "True",
            "totalResults": "2",
            "Search": [
                {"Title": "Dune", "Year": "2021", "imdbID": "tt1160419", "Type": "movie", "Poster": "N/A"},
                {"Title": "Dune: Part Two", "Year": "2024", "imdbID": "tt15239678", "Type": "movie",
                 "Poster": "https://img.example/dune2.jpg"}
            ]
        });
        let value = into_api_result(body).unwrap();
        let payload: SearchPayload = serde_json::from_value(value).unwrap();
        assert_eq!(payload.search.len(), 2);
        assert_eq!(payload.search[0].poster, None);
        assert_eq!(payload.search[1].title, "Dune: Part Two");
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_locally() {
        let config = OmdbConfig {
            base_url: "http://127.0.0.1:1/".into(),
            api_key: "test".into(),
        };
        // Unreachable base URL: an empty query must fail before any request.
        let result = search_movies(&config, "   ").await;
        assert!(matches!(result, Err(ApiError::InvalidQuery(_))));

        let result = fetch_movie_detail(&config, "").await;
        assert!(matches!(result, Err(ApiError::InvalidQuery(_))));
    }
}
