use dioxus::logger::tracing::error;
use dioxus::prelude::*;

use marquee_core::baas::{BaasClient, Document};
use marquee_core::watchlist::{BaasWatchlist, WatchlistEntry, WatchlistStore};

use crate::components::{use_app_config, use_auth, use_session, AuthStatus, Spinner, View};

/// The signed-in user's saved movies, newest first. Rows are pruned
/// locally after a successful remove instead of re-fetching the list.
#[component]
pub fn WatchlistView(on_navigate: EventHandler<View>) -> Element {
    let auth = use_auth();
    let config = use_app_config();
    let session = use_session();

    let mut entries: Signal<Option<Vec<Document<WatchlistEntry>>>> = use_signal(|| None);

    let load_config = config.clone();
    use_resource(move || {
        let config = load_config.clone();
        let session = session;
        let mut entries = entries;
        async move {
            let AuthStatus::SignedIn(account) = auth() else {
                entries.set(Some(Vec::new()));
                return;
            };
            let client = BaasClient::new(&config.baas).with_session(session.peek().clone());
            let store = BaasWatchlist::new(client, &config.baas);
            match store.list(&account.id).await {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    entries.set(Some(list));
                }
                Err(err) => {
                    error!("watchlist load failed: {}", err);
                    entries.set(Some(Vec::new()));
                }
            }
        }
    });

    let remove_config = config.clone();
    let remove = use_callback(move |document_id: String| {
        let config = remove_config.clone();
        let session = session;
        let mut entries = entries;
        spawn(async move {
            let client = BaasClient::new(&config.baas).with_session(session.peek().clone());
            let store = BaasWatchlist::new(client, &config.baas);
            match store.remove(&document_id).await {
                Ok(()) => entries.with_mut(|list| {
                    if let Some(list) = list {
                        list.retain(|doc| doc.id != document_id);
                    }
                }),
                Err(err) => error!("watchlist remove failed: {}", err),
            }
        });
    });

    if auth() == AuthStatus::SignedOut {
        return rsx! {
            section { class: "mq-watchlist mq-watchlist--empty",
                h1 { "Your watchlist" }
                p { "Log in to start saving movies." }
                button {
                    class: "mq-btn mq-btn--primary",
                    onclick: move |_| on_navigate.call(View::Login),
                    "Login"
                }
            }
        };
    }

    let body = match entries() {
        None => rsx! {
            div { class: "mq-watchlist-loading", Spinner {} }
        },
        Some(list) if list.is_empty() => rsx! {
            div { class: "mq-watchlist--empty",
                p { "Nothing saved yet. Tap the heart on any movie to add it." }
                button {
                    class: "mq-btn mq-btn--ghost",
                    onclick: move |_| on_navigate.call(View::Home),
                    "Browse movies"
                }
            }
        },
        Some(list) => rsx! {
            ul { class: "mq-watchlist-rows",
                for doc in list {
                    WatchlistRow {
                        key: "{doc.id}",
                        doc: doc.clone(),
                        on_open: move |imdb_id| on_navigate.call(View::MovieDetail(imdb_id)),
                        on_remove: remove,
                    }
                }
            }
        },
    };

    rsx! {
        section { class: "mq-watchlist",
            h1 { "Your watchlist" }
            {body}
        }
    }
}

#[component]
fn WatchlistRow(
    doc: Document<WatchlistEntry>,
    on_open: EventHandler<String>,
    on_remove: EventHandler<String>,
) -> Element {
    let title = doc.data.movie_title.clone();
    let poster = doc.data.movie_poster.clone();
    let year = doc.data.movie_year.clone();
    let imdb_id = doc.data.movie_imdb_id.clone();
    // ISO timestamp from the service; the date part is enough here.
    let added_on = doc
        .created_at
        .split('T')
        .next()
        .unwrap_or_default()
        .to_string();
    let document_id = doc.id.clone();

    rsx! {
        li { class: "mq-watchlist-row",
            img { class: "mq-watchlist-poster", src: "{poster}", alt: "{title}" }
            div { class: "mq-watchlist-info",
                h3 { class: "mq-watchlist-title", "{title}" }
                p { class: "mq-watchlist-meta", "{year}" }
                if !added_on.is_empty() {
                    p { class: "mq-watchlist-added", "Added {added_on}" }
                }
            }
            div { class: "mq-watchlist-actions",
                button {
                    class: "mq-btn mq-btn--ghost",
                    onclick: move |_| on_open.call(imdb_id.clone()),
                    "Details"
                }
                button {
                    class: "mq-btn mq-btn--danger",
                    onclick: move |_| on_remove.call(document_id.clone()),
                    "Remove"
                }
            }
        }
    }
}
