use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use marquee_core::baas::BaasClient;

use crate::components::{use_app_config, use_auth, use_session, AuthStatus, View};
use crate::storage;

/// Account registration. Creates the account, then immediately signs in
/// with the same credentials so the user lands on the home page with an
/// active session.
#[component]
pub fn RegisterView(on_navigate: EventHandler<View>) -> Element {
    let config = use_app_config();
    let mut auth = use_auth();
    let mut session = use_session();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_message = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let register_config = config.clone();
    let register = use_callback(move |_: ()| {
        let config = register_config.clone();
        let entered_name = name.peek().trim().to_string();
        let entered_email = email.peek().trim().to_string();
        let entered_password = password.peek().clone();

        if entered_name.is_empty() || entered_email.is_empty() || entered_password.is_empty() {
            error_message.set("All fields are required.".to_string());
            return;
        }
        if entered_password.len() < 8 {
            error_message.set("Password must be at least 8 characters.".to_string());
            return;
        }
        if *busy.peek() {
            return;
        }
        busy.set(true);
        error_message.set(String::new());

        spawn(async move {
            let client = BaasClient::new(&config.baas);
            let outcome = async {
                client
                    .create_account(&entered_email, &entered_password, &entered_name)
                    .await?;
                client
                    .create_email_session(&entered_email, &entered_password)
                    .await
            }
            .await;

            match outcome {
                Ok(new_session) => {
                    storage::save_session_secret(&new_session.secret);
                    session.set(Some(new_session.secret.clone()));

                    let client = client.with_session(Some(new_session.secret));
                    match client.get_account().await {
                        Ok(Some(account)) => {
                            info!("registered {}", account.display_name());
                            auth.set(AuthStatus::SignedIn(account));
                        }
                        Ok(None) => auth.set(AuthStatus::SignedOut),
                        Err(err) => {
                            error!("account fetch after registration failed: {}", err);
                            auth.set(AuthStatus::SignedOut);
                        }
                    }
                    on_navigate.call(View::Home);
                }
                Err(err) => {
                    error!("registration failed: {}", err);
                    error_message
                        .set("Registration failed. The email may already be in use.".to_string());
                }
            }
            busy.set(false);
        });
    });

    let is_busy = busy();
    let message = error_message();

    rsx! {
        section { class: "mq-auth-card",
            h1 { class: "mq-auth-title", "Create your account" }

            if !message.is_empty() {
                div { class: "mq-error-banner", "{message}" }
            }

            label { class: "mq-field",
                span { class: "mq-field-label", "Name" }
                input {
                    class: "mq-field-input",
                    r#type: "text",
                    placeholder: "Ada Lovelace",
                    value: "{name}",
                    disabled: is_busy,
                    oninput: move |evt| name.set(evt.value()),
                }
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
                    placeholder: "At least 8 characters",
                    value: "{password}",
                    disabled: is_busy,
                    oninput: move |evt| password.set(evt.value()),
                    onkeypress: move |evt| {
                        if evt.key() == Key::Enter {
                            register.call(());
                        }
                    },
                }
            }

            button {
                class: "mq-btn mq-btn--primary mq-auth-submit",
                disabled: is_busy,
                onclick: move |_| register.call(()),
                if is_busy { "Creating account…" } else { "Register" }
            }

            p { class: "mq-auth-switch",
                "Already have an account? "
                button {
                    class: "mq-link-button",
                    onclick: move |_| on_navigate.call(View::Login),
                    "Login"
                }
            }
        }
    }
}
