use dioxus::logger::tracing::error;
use dioxus::prelude::*;

use marquee_core::omdb::Movie;
use marquee_core::watchlist::{self, BaasWatchlist, WatchlistChange, WatchlistStore};

use crate::components::{use_app_config, use_auth, use_session, AuthStatus};
use crate::utils::browser;
use crate::utils::formatting::poster_or_fallback;

use marquee_core::baas::BaasClient;

/// Movie result card with poster, metadata, and the watchlist heart.
///
/// Membership is checked per card when the signed-in user or the movie
/// changes. The toggle guards against double clicks with an in-flight
/// flag; concurrent toggles from elsewhere can still race (the store has
/// no server-side uniqueness), and any resulting error is surfaced as an
/// alert.
#[component]
pub fn MovieCard(movie: Movie, on_open: EventHandler<String>) -> Element {
    let auth = use_auth();
    let config = use_app_config();
    let session = use_session();

    let mut in_watchlist = use_signal(|| false);
    let mut processing = use_signal(|| false);

    // Membership check on mount and whenever auth changes.
    let check_config = config.clone();
    let check_id = movie.imdb_id.clone();
    use_resource(move || {
        let config = check_config.clone();
        let imdb_id = check_id.clone();
        let session = session;
        let mut in_watchlist = in_watchlist;
        async move {
            let AuthStatus::SignedIn(account) = auth() else {
                in_watchlist.set(false);
                return;
            };
            let client = BaasClient::new(&config.baas).with_session(session.peek().clone());
            let store = BaasWatchlist::new(client, &config.baas);
            match store.find(&account.id, &imdb_id).await {
                Ok(found) => in_watchlist.set(found.is_some()),
                Err(err) => {
                    error!("watchlist status check failed: {}", err);
                    in_watchlist.set(false);
                }
            }
        }
    });

    let toggle_config = config.clone();
    let toggle_movie = movie.clone();
    let handle_toggle = move |evt: MouseEvent| {
        evt.stop_propagation();

        let viewer = match auth() {
            AuthStatus::SignedIn(account) => Some(account.id),
            _ => None,
        };
        if viewer.is_none() {
            browser::alert("Please log in to add movies to your watchlist!");
            return;
        }
        if processing() {
            return;
        }
        processing.set(true);

        let config = toggle_config.clone();
        let movie = toggle_movie.clone();
        let session = session;
        let mut in_watchlist = in_watchlist;
        let mut processing = processing;
        spawn(async move {
            let client = BaasClient::new(&config.baas).with_session(session.peek().clone());
            let store = BaasWatchlist::new(client, &config.baas);
            match watchlist::toggle_for_viewer(&store, viewer.as_deref(), &movie).await {
                Ok(Some(WatchlistChange::Added { .. })) => in_watchlist.set(true),
                Ok(Some(WatchlistChange::Removed)) => in_watchlist.set(false),
                // No viewer: nothing was written.
                Ok(None) => {}
                Err(err) => {
                    error!("watchlist toggle failed: {}", err);
                    browser::alert(&format!("Failed to update watchlist: {}", err));
                }
            }
            processing.set(false);
        });
    };

    let poster = poster_or_fallback(movie.poster.as_deref()).to_string();
    let title = movie.title.clone();
    let year = movie.year.clone();
    let media_type = movie.media_type.clone();
    let open_id = movie.imdb_id.clone();

    let heart_class = if in_watchlist() {
        "mq-heart mq-heart--active"
    } else {
        "mq-heart"
    };

    rsx! {
        article { class: "mq-movie-card",
            button {
                class: "mq-movie-poster-button",
                onclick: move |_| on_open.call(open_id.clone()),
                img { class: "mq-movie-poster", src: "{poster}", alt: "{title}" }
            }
            div { class: "mq-movie-body",
                h3 { class: "mq-movie-title", "{title}" }
                div { class: "mq-movie-meta",
                    span { class: "mq-movie-year", "{year}" }
                    if !media_type.is_empty() {
                        span { class: "mq-meta-dot", "•" }
                        span { class: "mq-movie-type", "{media_type}" }
                    }
                }
            }
            button {
                class: heart_class,
                disabled: processing(),
                "aria-label": "Toggle watchlist",
                onclick: handle_toggle,
                "♥"
            }
        }
    }
}
