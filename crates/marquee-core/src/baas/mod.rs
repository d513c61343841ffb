//! REST client for the Appwrite-compatible backend-as-a-service.
//!
//! Covers the two surfaces Marquee consumes: account sessions
//! ([`account`]) and document collections ([`documents`]). Nothing here is
//! transactional; every operation is a single self-contained HTTP call.
//!
//! # Sessions
//!
//! Creating an email session returns a secret which the app persists in
//! browser local storage and replays through the `X-Appwrite-Session`
//! header on later requests. A fetch()-backed client cannot rely on
//! cross-origin cookies, so the header-based session is the only scheme
//! used.

mod account;
mod documents;

pub use account::{Account, Session};
pub use documents::{Document, DocumentList, DocumentQuery};

use crate::config::BaasConfig;
use crate::error::BaasError;
use once_cell::sync::Lazy;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Shared HTTP client; reqwest pools connections per host internally.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    let builder = reqwest::Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .user_agent("Marquee/0.1.0 (movie discovery)")
        .timeout(std::time::Duration::from_secs(30));
    builder.build().expect("Failed to build HTTP client")
});

/// Structured error body returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Handle to one project on the backend, optionally carrying a session.
///
/// Cheap to clone; cloning is how the UI hands a snapshot of the current
/// session into spawned futures.
#[derive(Debug, Clone)]
pub struct BaasClient {
    endpoint: String,
    project_id: String,
    session_secret: Option<String>,
}

impl BaasClient {
    pub fn new(config: &BaasConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            session_secret: None,
        }
    }

    /// Attaches a previously persisted session secret, if any.
    pub fn with_session(mut self, secret: Option<String>) -> Self {
        self.session_secret = secret;
        self
    }

    pub fn session_secret(&self) -> Option<&str> {
        self.session_secret.as_deref()
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn project_id(&self) -> &str {
        &self.project_id
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Request builder with the project and session headers applied.
    pub(crate) fn base_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = HTTP_CLIENT
            .request(method, self.url(path))
            .header("X-Appwrite-Project", &self.project_id)
            .header("Content-Type", "application/json");
        if let Some(secret) = &self.session_secret {
            request = request.header("X-Appwrite-Session", secret);
        }
        request
    }

    /// Sends the request and decodes the response, mapping the service's
    /// error body and 401s into [`BaasError`].
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BaasError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            if status.as_u16() == 401 {
                return Err(BaasError::Unauthenticated);
            }
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            return Err(BaasError::Api {
                code: status.as_u16(),
                message,
            });
        }

        // DELETE endpoints answer 204 with an empty body.
        if status.as_u16() == 204 {
            return serde_json::from_value(Value::Null)
                .map_err(|e| BaasError::Decode(e.to_string()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BaasError::Decode(e.to_string()))
    }

    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, BaasError> {
        let mut request = self.base_request(method, path);
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaasConfig;

    fn test_config() -> BaasConfig {
        BaasConfig {
            endpoint: "https://cloud.example.io/v1/".into(),
            project_id: "marquee-dev".into(),
            database_id: "marquee".into(),
            watchlist_collection_id: "watchlist".into(),
            search_history_collection_id: "search_history".into(),
            trending_collection_id: "trending_movies".into(),
        }
    }

    #[test]
    fn test_endpoint_trailing_slash_is_normalized() {
        let client = BaasClient::new(&test_config());
        assert_eq!(
            client.url("/account"),
            "https://cloud.example.io/v1/account"
        );
    }

    #[test]
    fn test_with_session_attaches_secret() {
        let client = BaasClient::new(&test_config()).with_session(Some("s3cret".into()));
        assert_eq!(client.session_secret(), Some("s3cret"));

        let client = client.with_session(None);
        assert_eq!(client.session_secret(), None);
    }
}
