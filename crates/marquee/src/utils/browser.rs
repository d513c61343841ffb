//! Browser shims: alerts and navigation, with native stand-ins so the
//! component tree still compiles for desktop builds and tests.

use dioxus::logger::tracing::{info, warn};

/// Blocking browser alert; logs on non-web targets.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
        return;
    }
    info!("alert: {}", message);
}

/// Whether the OS prefers a dark color scheme. Defaults to dark outside
/// the browser and when the media query is unavailable.
pub fn prefers_dark() -> bool {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        if let Ok(Some(query)) = window.match_media("(prefers-color-scheme: dark)") {
            return query.matches();
        }
    }
    true
}

/// Origin of the current page, used to build OAuth callback URLs.
pub fn origin() -> String {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        if let Ok(origin) = window.location().origin() {
            return origin;
        }
    }
    "http://localhost:8080".to_string()
}

/// Full-page navigation, handing control to an external URL (OAuth).
pub fn redirect(url: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        if window.location().set_href(url).is_ok() {
            return;
        }
    }
    warn!("redirect requested outside the browser: {}", url);
}
