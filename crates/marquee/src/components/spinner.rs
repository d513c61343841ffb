use dioxus::prelude::*;

/// Loading indicator used by every view with an in-flight request.
#[component]
pub fn Spinner() -> Element {
    rsx! {
        div { class: "mq-spinner", role: "status", "aria-label": "Loading" }
    }
}
