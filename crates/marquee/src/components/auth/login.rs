use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use marquee_core::baas::BaasClient;

use crate::components::{use_app_config, use_auth, use_session, AuthStatus, View};
use crate::storage;
use crate::utils::browser;

/// Email/password sign-in, plus OAuth2 buttons that hand the flow to the
/// backend. On success the session secret is persisted and the account is
/// fetched so the app bar greeting updates before navigating home.
#[component]
pub fn LoginView(on_navigate: EventHandler<View>) -> Element {
    let config = use_app_config();
    let mut auth = use_auth();
    let mut session = use_session();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_message = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let login_config = config.clone();
    let login = use_callback(move |_: ()| {
        let config = login_config.clone();
        let entered_email = email.peek().trim().to_string();
        let entered_password = password.peek().clone();

        if entered_email.is_empty() || entered_password.is_empty() {
            error_message.set("Enter both email and password.".to_string());
            return;
        }
        if *busy.peek() {
            return;
        }
        busy.set(true);
        error_message.set(String::new());

        spawn(async move {
            let client = BaasClient::new(&config.baas);
            match client
                .create_email_session(&entered_email, &entered_password)
                .await
            {
                Ok(new_session) => {
                    storage::save_session_secret(&new_session.secret);
                    session.set(Some(new_session.secret.clone()));

                    let client = client.with_session(Some(new_session.secret));
                    match client.get_account().await {
                        Ok(Some(account)) => {
                            info!("signed in as {}", account.display_name());
                            auth.set(AuthStatus::SignedIn(account));
                        }
                        Ok(None) => auth.set(AuthStatus::SignedOut),
                        Err(err) => {
                            error!("account fetch after login failed: {}", err);
                            auth.set(AuthStatus::SignedOut);
                        }
                    }
                    on_navigate.call(View::Home);
                }
                Err(err) => {
                    error!("login failed: {}", err);
                    error_message.set("Login failed. Check your email and password.".to_string());
                }
            }
            busy.set(false);
        });
    });

    let oauth_config = config.clone();
    let oauth = use_callback(move |provider: &'static str| {
        let origin = browser::origin();
        let client = BaasClient::new(&oauth_config.baas);
        let url = client.oauth2_redirect_url(
            provider,
            &format!("{}/", origin),
            &format!("{}/login?error=oauth_failed", origin),
        );
        browser::redirect(&url);
    });

    let is_busy = busy();
    let message = error_message();

    rsx! {
        section { class: "mq-auth-card",
            h1 { class: "mq-auth-title", "Welcome back" }

            if !message.is_empty() {
                div { class: "mq-error-banner", "{message}" }
            }

            label { class: "mq-field",
                span { class: "mq-field-label", "Email" }
                input {
                    class: "mq-field-input",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email}",
                    disabled: is_busy,
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            label { class: "mq-field",
                span { class: "mq-field-label", "Password" }
                input {
                    class: "mq-field-input",
                    r#type: "password",
                    placeholder: "••••••••",
                    value: "{password}",
                    disabled: is_busy,
                    oninput: move |evt| password.set(evt.value()),
                    onkeypress: move |evt| {
                        if evt.key() == Key::Enter {
                            login.call(());
                        }
                    },
                }
            }

            button {
                class: "mq-btn mq-btn--primary mq-auth-submit",
                disabled: is_busy,
                onclick: move |_| login.call(()),
                if is_busy { "Signing in…" } else { "Login" }
            }

            div { class: "mq-auth-divider", span { "or continue with" } }
            div { class: "mq-oauth-row",
                button {
                    class: "mq-btn mq-btn--oauth",
                    onclick: move |_| oauth.call("google"),
                    "Google"
                }
                button {
                    class: "mq-btn mq-btn--oauth",
                    onclick: move |_| oauth.call("facebook"),
                    "Facebook"
                }
            }

            p { class: "mq-auth-switch",
                "New here? "
                button {
                    class: "mq-link-button",
                    onclick: move |_| on_navigate.call(View::Register),
                    "Create an account"
                }
            }
        }
    }
}
