//! UI components for the Marquee application.
//!
//! # Context Providers
//!
//! Components share state through Dioxus context:
//!
//! ```ignore
//! // Current account, resolved once on startup (401 means signed out)
//! let auth = use_auth();
//!
//! // Search term, result grid, and error banner; survives navigation
//! let state = use_search_state();
//!
//! // Persisted session secret, replayed into spawned BaaS calls
//! let session = use_session();
//! ```

mod app_shell;
mod auth;
mod detail;
mod home;
pub mod search;
mod spinner;
mod watchlist_view;

pub use app_shell::{AppBar, Footer, View};
pub use auth::{LoginView, RegisterView};
pub use detail::DetailView;
pub use home::HomeView;
pub use search::{MovieCard, SearchCard};
pub use spinner::Spinner;
pub use watchlist_view::WatchlistView;

use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use std::rc::Rc;

use marquee_core::baas::{Account, BaasClient};
use marquee_core::config::AppConfig;
use marquee_core::omdb::Movie;

use crate::storage;
use crate::utils::browser;

/// Color theme, toggled from the app bar and persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Parses a stored preference; anything unrecognized means "no
    /// preference" so the OS default applies.
    pub fn from_stored(value: Option<&str>) -> Option<Self> {
        match value {
            Some("dark") => Some(Self::Dark),
            Some("light") => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Stored preference first, then the OS color scheme.
fn initial_theme() -> Theme {
    Theme::from_stored(storage::load_theme().as_deref()).unwrap_or_else(|| {
        if browser::prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    })
}

/// Authentication state for UI display.
#[derive(Clone, PartialEq)]
pub enum AuthStatus {
    /// Startup session check still in flight.
    Pending,
    /// No active session.
    SignedOut,
    /// Active session with its account record.
    SignedIn(Account),
}

/// Search state shared between the home grid and the detail page's back
/// navigation. Restored from local storage on startup.
#[derive(Clone, PartialEq, Default)]
pub struct SearchState {
    pub term: String,
    pub movies: Vec<Movie>,
    pub error_message: String,
    pub is_loading: bool,
    pub has_searched: bool,
}

impl SearchState {
    /// Rebuilds the last session's search from local storage.
    pub fn restore() -> Self {
        let movies = storage::load_cached_results();
        Self {
            term: storage::load_last_search_term().unwrap_or_default(),
            has_searched: storage::load_has_searched() || !movies.is_empty(),
            movies,
            ..Self::default()
        }
    }
}

// Context accessors

pub fn use_app_config() -> Rc<AppConfig> {
    use_context::<Rc<AppConfig>>()
}

/// The persisted BaaS session secret, if any.
pub fn use_session() -> Signal<Option<String>> {
    use_context::<Signal<Option<String>>>()
}

pub fn use_auth() -> Signal<AuthStatus> {
    use_context::<Signal<AuthStatus>>()
}

pub fn use_theme() -> Signal<Theme> {
    use_context::<Signal<Theme>>()
}

pub fn use_search_state() -> Signal<SearchState> {
    use_context::<Signal<SearchState>>()
}

/// Application root: resolves configuration, then mounts the shell.
#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::from_env);

    match config {
        Ok(config) => rsx! {
            Shell { config }
        },
        Err(err) => rsx! {
            div { class: "mq-config-error",
                h1 { "Marquee is not configured" }
                p { "{err}" }
                p { class: "mq-config-error-hint",
                    "Set the MARQUEE_* environment variables at build time and rebuild."
                }
            }
        },
    }
}

/// The configured application: context providers, startup session check,
/// app bar, active view, footer.
#[component]
fn Shell(config: AppConfig) -> Element {
    let config = use_hook(|| Rc::new(config.clone()));

    let session =
        use_context_provider(|| Signal::new(storage::load_session_secret()));
    let auth = use_context_provider(|| Signal::new(AuthStatus::Pending));
    let theme = use_context_provider(|| Signal::new(initial_theme()));
    use_context_provider(|| Signal::new(SearchState::restore()));

    let mut current_view = use_signal(|| View::Home);

    // Resolve the session once on startup. A 401 is the normal signed-out
    // state; anything else is logged and treated the same way.
    let startup_config = config.clone();
    use_future(move || {
        let config = startup_config.clone();
        let mut auth = auth;
        let session = session;
        async move {
            let client = BaasClient::new(&config.baas).with_session(session.peek().clone());
            match client.get_account().await {
                Ok(Some(account)) => {
                    info!("active session found for {}", account.display_name());
                    auth.set(AuthStatus::SignedIn(account));
                }
                Ok(None) => auth.set(AuthStatus::SignedOut),
                Err(err) => {
                    error!("session check failed: {}", err);
                    auth.set(AuthStatus::SignedOut);
                }
            }
        }
    });

    let on_navigate = move |view: View| current_view.set(view);

    let logout_config = config.clone();
    let on_logout = move |_| {
        let config = logout_config.clone();
        let mut auth = auth;
        let mut session = session;
        let mut current_view = current_view;
        spawn(async move {
            let client = BaasClient::new(&config.baas).with_session(session.peek().clone());
            match client.delete_session("current").await {
                Ok(()) => {
                    storage::clear_session_secret();
                    session.set(None);
                    auth.set(AuthStatus::SignedOut);
                    current_view.set(View::Home);
                    browser::alert("Logged out successfully!");
                }
                Err(err) => {
                    error!("logout failed: {}", err);
                    browser::alert("Failed to log out.");
                }
            }
        });
    };

    let shell_class = match theme() {
        Theme::Dark => "mq-app",
        Theme::Light => "mq-app mq-app--light",
    };

    // Hold the full-page spinner until the session check resolves, so the
    // app bar never flashes the signed-out controls at a signed-in user.
    if auth() == AuthStatus::Pending {
        return rsx! {
            div { class: "{shell_class} mq-app--loading",
                Spinner {}
            }
        };
    }

    let body = match current_view() {
        View::Home => rsx! {
            HomeView { on_navigate }
        },
        View::Watchlist => rsx! {
            WatchlistView { on_navigate }
        },
        View::Login => rsx! {
            LoginView { on_navigate }
        },
        View::Register => rsx! {
            RegisterView { on_navigate }
        },
        View::MovieDetail(imdb_id) => rsx! {
            DetailView { imdb_id, on_navigate }
        },
    };

    rsx! {
        div { class: "{shell_class}",
            AppBar {
                current_view,
                on_navigate,
                on_logout,
            }
            main { class: "mq-main", {body} }
            Footer {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parses_stored_preference() {
        assert_eq!(Theme::from_stored(Some("dark")), Some(Theme::Dark));
        assert_eq!(Theme::from_stored(Some("light")), Some(Theme::Light));
        assert_eq!(Theme::from_stored(Some("solarized")), None);
        assert_eq!(Theme::from_stored(None), None);
    }

    #[test]
    fn test_theme_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().as_str(), "dark");
    }
}
