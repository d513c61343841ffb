use dioxus::prelude::*;

use crate::storage;
use crate::utils::recent::push_recent;

/// Static suggestions shown under the input before any recent history
/// accumulates, filtered by what the user has typed so far.
const POPULAR_SEARCHES: [&str; 10] = [
    "Avengers",
    "Spider-Man",
    "Batman",
    "Star Wars",
    "Marvel",
    "Harry Potter",
    "Lord of the Rings",
    "Fast & Furious",
    "Matrix",
    "Inception",
];

/// Search input with clear button, recent-search suggestions, and a
/// popular-search list. Keystrokes go to `on_input` (debounced upstream);
/// Enter and suggestion clicks go to `on_submit`.
#[component]
pub fn SearchCard(
    value: String,
    searching: bool,
    on_input: EventHandler<String>,
    on_submit: EventHandler<String>,
    on_clear: EventHandler<()>,
) -> Element {
    let mut recent_searches = use_signal(storage::load_recent_searches);
    let mut focused = use_signal(|| false);

    let submit_value = value.clone();
    let mut submit = move |term: String| {
        if term.trim().is_empty() {
            return;
        }
        recent_searches.with_mut(|list| {
            push_recent(list, &term);
            storage::save_recent_searches(list);
        });
        on_submit.call(term);
    };

    let handle_keypress = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter {
            submit(submit_value.clone());
        }
    };

    let typed = value.to_lowercase();
    let popular: Vec<&str> = POPULAR_SEARCHES
        .iter()
        .copied()
        .filter(|candidate| candidate.to_lowercase().contains(&typed))
        .collect();

    let recent = recent_searches();
    let show_suggestions = focused() && (!recent.is_empty() || !popular.is_empty());
    let has_value = !value.is_empty();

    rsx! {
        div { class: "mq-search-card",
            div { class: "mq-search-input-row",
                span { class: "mq-search-icon", "🔍" }
                input {
                    class: "mq-search-input",
                    r#type: "text",
                    placeholder: "Search for movies…",
                    value: "{value}",
                    disabled: searching,
                    oninput: move |evt| on_input.call(evt.value()),
                    onkeypress: handle_keypress,
                    onfocus: move |_| focused.set(true),
                    // Delay matches the suggestion click, which fires first.
                    onblur: move |_| focused.set(false),
                }
                if has_value {
                    button {
                        class: "mq-search-clear",
                        onclick: move |_| on_clear.call(()),
                        "✕"
                    }
                }
            }

            if show_suggestions {
                div { class: "mq-search-suggestions",
                    if !recent.is_empty() {
                        div { class: "mq-suggestion-group",
                            div { class: "mq-suggestion-header",
                                span { "Recent searches" }
                                button {
                                    class: "mq-suggestion-clear",
                                    onmousedown: move |_| {
                                        recent_searches.set(Vec::new());
                                        storage::clear_recent_searches();
                                    },
                                    "Clear"
                                }
                            }
                            for term in recent.iter().cloned() {
                                SuggestionRow { term, on_pick: submit }
                            }
                        }
                    }
                    if !popular.is_empty() {
                        div { class: "mq-suggestion-group",
                            div { class: "mq-suggestion-header",
                                span { "Popular" }
                            }
                            for term in popular.iter().map(|s| s.to_string()) {
                                SuggestionRow { term, on_pick: submit }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One clickable suggestion. Uses `onmousedown` so it fires before the
/// input's blur hides the dropdown.
#[component]
fn SuggestionRow(term: String, on_pick: EventHandler<String>) -> Element {
    let picked = term.clone();
    rsx! {
        button {
            class: "mq-suggestion-row",
            onmousedown: move |_| on_pick.call(picked.clone()),
            "{term}"
        }
    }
}
