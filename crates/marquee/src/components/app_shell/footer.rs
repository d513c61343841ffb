use dioxus::prelude::*;

/// Static page footer.
#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "mq-footer",
            span { "Marquee" }
            span { class: "mq-footer-dot", "•" }
            span { "Movie data from the OMDB API" }
        }
    }
}
