use dioxus::prelude::*;

/// Shown when a search completed successfully but matched nothing.
#[component]
pub fn EmptyState(term: String) -> Element {
    rsx! {
        div { class: "mq-empty-state",
            span { class: "mq-empty-icon", "🎞" }
            h3 { "No movies found" }
            p { "Nothing matched \"{term}\". Try a different title." }
        }
    }
}
