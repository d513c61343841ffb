use dioxus::prelude::*;

use crate::components::{use_auth, use_theme, AuthStatus, Theme};
use crate::storage;

/// View selection enum for navigation. There is no URL router; the active
/// view lives in app state and search results survive navigation because
/// they are held in a shared context.
#[derive(Clone, PartialEq)]
pub enum View {
    Home,
    Watchlist,
    Login,
    Register,
    /// Detail page for one movie, keyed by its external id.
    MovieDetail(String),
}

/// Global app bar with brand, navigation, and the auth controls.
#[component]
pub fn AppBar(
    current_view: ReadOnlySignal<View>,
    on_navigate: EventHandler<View>,
    on_logout: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let mut theme = use_theme();

    let theme_icon = match theme() {
        Theme::Dark => "☀",
        Theme::Light => "🌙",
    };
    let toggle_theme = move |_| {
        let next = theme.peek().toggled();
        theme.set(next);
        storage::save_theme(next.as_str());
    };

    let watchlist_class = if current_view() == View::Watchlist {
        "mq-nav-link mq-nav-link--active"
    } else {
        "mq-nav-link"
    };

    let nav = match auth() {
        AuthStatus::SignedIn(account) => {
            let greeting = format!("Hello, {}!", account.display_name());
            rsx! {
                span { class: "mq-appbar-greeting", "{greeting}" }
                button {
                    class: watchlist_class,
                    onclick: move |_| on_navigate.call(View::Watchlist),
                    "Watchlist"
                }
                button {
                    class: "mq-btn mq-btn--ghost",
                    onclick: move |_| on_logout.call(()),
                    "Logout"
                }
            }
        }
        _ => rsx! {
            button {
                class: "mq-nav-link",
                onclick: move |_| on_navigate.call(View::Login),
                "Login"
            }
            button {
                class: "mq-btn mq-btn--primary",
                onclick: move |_| on_navigate.call(View::Register),
                "Register"
            }
        },
    };

    rsx! {
        header { class: "mq-appbar",
            button {
                class: "mq-brand",
                onclick: move |_| on_navigate.call(View::Home),
                span { class: "mq-brand-mark", "🎬" }
                span { class: "mq-brand-name", "Marquee" }
            }
            nav { class: "mq-appbar-nav",
                button {
                    class: "mq-nav-link mq-theme-toggle",
                    "aria-label": "Toggle color theme",
                    onclick: toggle_theme,
                    "{theme_icon}"
                }
                {nav}
            }
        }
    }
}
