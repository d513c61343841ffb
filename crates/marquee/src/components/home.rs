use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;

use marquee_core::baas::{BaasClient, Document};
use marquee_core::error::ApiError;
use marquee_core::omdb::search_movies;
use marquee_core::trending::{record_search, trending_movies, BaasCounters, SearchCountEntry};

use crate::components::{use_app_config, use_search_state, use_session, SearchState, View};
use crate::components::{MovieCard, SearchCard, Spinner};
use crate::components::search::EmptyState;
use crate::storage;
use crate::utils::formatting::relative_time;

/// How long the input must settle before a search fires.
const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Messages for the search coroutine.
enum SearchMessage {
    /// A keystroke; debounced before searching.
    QueryChanged(String),
    /// Enter or a suggestion click; searches immediately.
    Submit(String),
}

async fn settle_delay() {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(SEARCH_DEBOUNCE_MS as u64)).await;
}

/// Waits for the input to settle, then returns the term to search.
///
/// After each delay the whole queue is drained, so a burst of keystrokes
/// costs one delay rather than one per message. A queued `Submit` wins
/// immediately.
async fn settle_term(rx: &mut UnboundedReceiver<SearchMessage>, first: String) -> String {
    let mut latest = first;
    loop {
        settle_delay().await;
        let mut saw_keystroke = false;
        loop {
            match rx.try_next() {
                Ok(Some(SearchMessage::QueryChanged(next))) => {
                    latest = next;
                    saw_keystroke = true;
                }
                Ok(Some(SearchMessage::Submit(next))) => return next,
                // Empty or closed: nothing more queued.
                _ => break,
            }
        }
        if !saw_keystroke {
            return latest;
        }
    }
}

/// Home view: hero heading, search card, result grid, and trending rail.
#[component]
pub fn HomeView(on_navigate: EventHandler<View>) -> Element {
    let config = use_app_config();
    let session = use_session();
    let mut state = use_search_state();
    let mut trending_rail = use_signal(Vec::<Document<SearchCountEntry>>::new);

    // Search coroutine. Keystrokes are debounced by draining the channel
    // until the input settles; a superseded search is simply never sent,
    // there is no cancellation of in-flight requests.
    let search_task = use_coroutine({
        let config = config.clone();
        move |mut rx: UnboundedReceiver<SearchMessage>| {
            let config = config.clone();
            async move {
                while let Some(msg) = rx.next().await {
                    let term = match msg {
                        SearchMessage::Submit(term) => term,
                        SearchMessage::QueryChanged(first) => settle_term(&mut rx, first).await,
                    };

                    if term.trim().is_empty() {
                        continue;
                    }

                    state.with_mut(|s| {
                        s.is_loading = true;
                        s.error_message.clear();
                    });
                    info!("searching for '{}'", term);

                    match search_movies(&config.omdb, &term).await {
                        Ok(movies) => {
                            storage::save_search_snapshot(&term, &movies);
                            let first_hit = movies.first().cloned();
                            state.with_mut(|s| {
                                s.movies = movies;
                                s.has_searched = true;
                                s.is_loading = false;
                            });

                            // Count the search and refresh the rail. Failures
                            // inside record_search are logged and swallowed.
                            if let Some(first_hit) = first_hit {
                                let client = BaasClient::new(&config.baas)
                                    .with_session(session.peek().clone());
                                let history =
                                    BaasCounters::search_history(client.clone(), &config.baas);
                                let trending = BaasCounters::trending(client, &config.baas);
                                record_search(&history, &trending, &term, &first_hit).await;
                                trending_rail.set(trending_movies(&trending).await);
                            }
                        }
                        Err(ApiError::Api(message)) => {
                            state.with_mut(|s| {
                                s.movies.clear();
                                s.error_message = message;
                                s.has_searched = true;
                                s.is_loading = false;
                            });
                        }
                        Err(err) => {
                            error!("movie search failed: {}", err);
                            state.with_mut(|s| {
                                s.error_message =
                                    "Error fetching movies. Please try again later.".to_string();
                                s.has_searched = true;
                                s.is_loading = false;
                            });
                        }
                    }
                }
            }
        }
    });

    // Load the trending rail once on mount.
    let rail_config = config.clone();
    use_future(move || {
        let config = rail_config.clone();
        let session = session;
        let mut trending_rail = trending_rail;
        async move {
            let client = BaasClient::new(&config.baas).with_session(session.peek().clone());
            let trending = BaasCounters::trending(client, &config.baas);
            trending_rail.set(trending_movies(&trending).await);
        }
    });

    let on_input = move |value: String| {
        state.with_mut(|s| s.term = value.clone());
        search_task.send(SearchMessage::QueryChanged(value));
    };

    let on_submit = move |value: String| {
        state.with_mut(|s| s.term = value.clone());
        search_task.send(SearchMessage::Submit(value));
    };

    let on_clear = move |_| {
        state.set(SearchState::default());
        storage::clear_search_snapshot();
    };

    let current = state();
    let rail = trending_rail();

    let results = if current.is_loading {
        rsx! {
            div { class: "mq-results-loading", Spinner {} }
        }
    } else if !current.error_message.is_empty() {
        rsx! {
            div { class: "mq-error-banner", "{current.error_message}" }
        }
    } else if current.has_searched && current.movies.is_empty() {
        rsx! {
            EmptyState { term: current.term.clone() }
        }
    } else {
        rsx! {
            div { class: "mq-movie-grid",
                for movie in current.movies.iter().cloned() {
                    MovieCard {
                        key: "{movie.imdb_id}",
                        movie,
                        on_open: move |imdb_id| on_navigate.call(View::MovieDetail(imdb_id)),
                    }
                }
            }
        }
    };

    rsx! {
        section { class: "mq-hero",
            h1 { class: "mq-hero-title",
                "Find movies you'll "
                span { class: "mq-hero-accent", "love" }
            }
            p { class: "mq-hero-tagline",
                "Search thousands of titles, keep a watchlist, see what everyone else is finding."
            }
            SearchCard {
                value: current.term.clone(),
                searching: current.is_loading,
                on_input,
                on_submit,
                on_clear,
            }
        }

        {results}

        if !rail.is_empty() {
            section { class: "mq-trending",
                h2 { class: "mq-section-title", "Trending searches" }
                ol { class: "mq-trending-rail",
                    for (rank, entry) in rail.iter().enumerate() {
                        TrendingRow {
                            key: "{entry.id}",
                            rank: rank + 1,
                            entry: entry.data.clone(),
                            on_navigate,
                        }
                    }
                }
            }
        }
    }
}

/// One row of the trending rail.
#[component]
fn TrendingRow(rank: usize, entry: SearchCountEntry, on_navigate: EventHandler<View>) -> Element {
    let poster = entry.movie_poster.clone();
    let title = entry.movie_title.clone();
    let count = entry.count;
    let last_seen = relative_time(entry.searched_at);
    let imdb_id = entry.movie_imdb_id.clone();

    rsx! {
        li { class: "mq-trending-item",
            span { class: "mq-trending-rank", "{rank}" }
            img { class: "mq-trending-poster", src: "{poster}", alt: "{title}" }
            div { class: "mq-trending-meta",
                button {
                    class: "mq-trending-title",
                    onclick: move |_| on_navigate.call(View::MovieDetail(imdb_id.clone())),
                    "{title}"
                }
                span { class: "mq-trending-counts",
                    "{count} searches"
                    span { class: "mq-meta-dot", "•" }
                    "{last_seen}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc;

    #[tokio::test]
    async fn test_keystroke_burst_settles_to_last_in_one_pass() {
        let (tx, mut rx) = mpsc::unbounded();
        for term in ["du", "dun", "dune"] {
            tx.unbounded_send(SearchMessage::QueryChanged(term.to_string()))
                .unwrap();
        }

        let started = std::time::Instant::now();
        let settled = settle_term(&mut rx, "d".to_string()).await;

        assert_eq!(settled, "dune");
        // One drain pass plus the final empty check: two delays, not four.
        let ceiling = std::time::Duration::from_millis(3 * SEARCH_DEBOUNCE_MS as u64);
        assert!(started.elapsed() < ceiling);
    }

    #[tokio::test]
    async fn test_queued_submit_wins_immediately() {
        let (tx, mut rx) = mpsc::unbounded();
        tx.unbounded_send(SearchMessage::QueryChanged("mat".to_string()))
            .unwrap();
        tx.unbounded_send(SearchMessage::Submit("matrix".to_string()))
            .unwrap();

        let settled = settle_term(&mut rx, "m".to_string()).await;
        assert_eq!(settled, "matrix");
    }

    #[tokio::test]
    async fn test_empty_queue_returns_first_term() {
        let (tx, mut rx) = mpsc::unbounded();
        drop(tx);
        let settled = settle_term(&mut rx, "dune".to_string()).await;
        assert_eq!(settled, "dune");
    }
}
