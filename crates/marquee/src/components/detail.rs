use dioxus::prelude::*;

use marquee_core::omdb::{fetch_movie_detail, MovieDetail};

use crate::components::{use_app_config, Spinner, View};
use crate::utils::formatting::poster_or_fallback;

/// Movie detail page, fetched fresh on mount with the full plot.
///
/// The back button returns to Home; the search grid survives because it
/// lives in shared context, so nothing is re-fetched.
#[component]
pub fn DetailView(imdb_id: String, on_navigate: EventHandler<View>) -> Element {
    let config = use_app_config();

    let fetch_id = imdb_id.clone();
    let detail = use_resource(move || {
        let config = config.clone();
        let imdb_id = fetch_id.clone();
        async move { fetch_movie_detail(&config.omdb, &imdb_id).await }
    });

    let body = match &*detail.read() {
        None => rsx! {
            div { class: "mq-detail-loading", Spinner {} }
        },
        Some(Err(err)) => rsx! {
            div { class: "mq-error-banner", "{err}" }
        },
        Some(Ok(detail)) => {
            let detail = detail.clone();
            rsx! {
                DetailBody { detail }
            }
        }
    };

    rsx! {
        section { class: "mq-detail",
            button {
                class: "mq-btn mq-btn--ghost mq-back-button",
                onclick: move |_| on_navigate.call(View::Home),
                "← Back to search"
            }
            {body}
        }
    }
}

#[component]
fn DetailBody(detail: MovieDetail) -> Element {
    let poster = poster_or_fallback(detail.poster.as_deref()).to_string();
    let title = detail.title.clone();
    let headline = format!(
        "{} · {} · {}",
        detail.year,
        or_na(&detail.rated),
        or_na(&detail.runtime)
    );
    let genre = detail.genre.clone();
    let plot = detail.plot.clone();
    let imdb_line = if detail.imdb_rating.is_empty() || detail.imdb_rating == "N/A" {
        String::new()
    } else {
        format!("★ {} ({} votes)", detail.imdb_rating, detail.imdb_votes)
    };

    rsx! {
        div { class: "mq-detail-layout",
            img { class: "mq-detail-poster", src: "{poster}", alt: "{title}" }
            div { class: "mq-detail-main",
                h1 { class: "mq-detail-title", "{title}" }
                p { class: "mq-detail-headline", "{headline}" }
                if !imdb_line.is_empty() {
                    p { class: "mq-detail-imdb", "{imdb_line}" }
                }
                if !genre.is_empty() && genre != "N/A" {
                    div { class: "mq-detail-genres",
                        for tag in genre.split(", ").map(str::to_string) {
                            span { class: "mq-genre-chip", "{tag}" }
                        }
                    }
                }
                if !detail.ratings.is_empty() {
                    div { class: "mq-detail-ratings",
                        for rating in detail.ratings.iter() {
                            RatingPill {
                                source: rating.source.clone(),
                                value: rating.value.clone(),
                            }
                        }
                    }
                }
                if !plot.is_empty() {
                    p { class: "mq-detail-plot", "{plot}" }
                }
                dl { class: "mq-detail-facts",
                    FactRow { label: "Director", value: detail.director.clone() }
                    FactRow { label: "Writer", value: detail.writer.clone() }
                    FactRow { label: "Actors", value: detail.actors.clone() }
                    FactRow { label: "Released", value: detail.released.clone() }
                    FactRow { label: "Language", value: detail.language.clone() }
                    FactRow { label: "Country", value: detail.country.clone() }
                    FactRow { label: "Awards", value: detail.awards.clone() }
                    FactRow { label: "Box office", value: detail.box_office.clone() }
                }
            }
        }
    }
}

#[component]
fn RatingPill(source: String, value: String) -> Element {
    rsx! {
        span { class: "mq-rating-pill", "{source}: {value}" }
    }
}

/// One label/value row; skipped entirely when the API had no value.
#[component]
fn FactRow(label: &'static str, value: String) -> Element {
    if value.is_empty() || value == "N/A" {
        return rsx! {};
    }
    rsx! {
        div { class: "mq-fact-row",
            dt { class: "mq-fact-label", "{label}" }
            dd { class: "mq-fact-value", "{value}" }
        }
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
