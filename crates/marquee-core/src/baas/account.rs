//! Account and session operations.
//!
//! The app only forwards login/logout intents and reads the current
//! account; user records themselves are opaque service state.

use super::BaasClient;
use crate::error::BaasError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A signed-in user account as returned by `GET /account`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Account {
    /// Display name for greetings: the profile name, or the email when the
    /// name was never set (e.g. OAuth accounts without one).
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// An authentication session. `secret` is only populated in the creation
/// response and must be persisted by the caller; it is never readable
/// again.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub expire: String,
}

impl BaasClient {
    /// Registers a new account. The service generates the user id.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, BaasError> {
        let body = json!({
            "userId": "unique()",
            "email": email,
            "password": password,
            "name": name,
        });
        self.request(Method::POST, "/account", Some(body)).await
    }

    /// Signs in with email and password, returning the new session.
    pub async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BaasError> {
        let body = json!({"email": email, "password": password});
        self.request(Method::POST, "/account/sessions/email", Some(body))
            .await
    }

    /// Fetches the current account.
    ///
    /// `Ok(None)` means there is no active session; a 401 here is the
    /// normal signed-out state, not a failure.
    pub async fn get_account(&self) -> Result<Option<Account>, BaasError> {
        match self.request::<Account>(Method::GET, "/account", None).await {
            Ok(account) => Ok(Some(account)),
            Err(err) if err.is_unauthenticated() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Deletes a session; pass `"current"` to sign out of this one.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), BaasError> {
        self.request::<()>(
            Method::DELETE,
            &format!("/account/sessions/{}", session_id),
            None,
        )
        .await
    }

    /// Browser redirect target for an OAuth2 login (`google`, `facebook`).
    /// Navigating to this URL hands the rest of the flow to the service.
    pub fn oauth2_redirect_url(
        &self,
        provider: &str,
        success_url: &str,
        failure_url: &str,
    ) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("project", self.project_id())
            .append_pair("success", success_url)
            .append_pair("failure", failure_url)
            .finish();
        format!(
            "{}/account/sessions/oauth2/{}?{}",
            self.endpoint(),
            provider,
            query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaasConfig;

    fn client() -> BaasClient {
        BaasClient::new(&BaasConfig {
            endpoint: "https://cloud.example.io/v1".into(),
            project_id: "marquee-dev".into(),
            database_id: "marquee".into(),
            watchlist_collection_id: "watchlist".into(),
            search_history_collection_id: "search_history".into(),
            trending_collection_id: "trending_movies".into(),
        })
    }

    #[test]
    fn test_session_secret_defaults_to_empty() {
        let session: Session = serde_json::from_str(
            r#"{"$id": "sess_1", "userId": "user_1", "expire": "2026-09-30T00:00:00.000+00:00"}"#,
        )
        .unwrap();
        assert_eq!(session.secret, "");
        assert_eq!(session.user_id, "user_1");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let account: Account =
            serde_json::from_str(r#"{"$id": "user_1", "email": "ada@example.com"}"#).unwrap();
        assert_eq!(account.display_name(), "ada@example.com");

        let named: Account = serde_json::from_str(
            r#"{"$id": "user_1", "name": "Ada", "email": "ada@example.com"}"#,
        )
        .unwrap();
        assert_eq!(named.display_name(), "Ada");
    }

    #[test]
    fn test_oauth2_redirect_url_encodes_callbacks() {
        let url = client().oauth2_redirect_url(
            "google",
            "https://app.example.com/",
            "https://app.example.com/login?error=oauth_failed",
        );
        assert!(url.starts_with("https://cloud.example.io/v1/account/sessions/oauth2/google?"));
        assert!(url.contains("project=marquee-dev"));
        assert!(url.contains("success=https%3A%2F%2Fapp.example.com%2F"));
        assert!(url.contains("error%3Doauth_failed"));
    }
}
