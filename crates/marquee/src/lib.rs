//! Marquee - movie discovery in the browser.
//!
//! A Dioxus application compiled to WebAssembly. Users search a hosted
//! movie database, browse a trending rail fed by search counts, inspect
//! detail pages, and keep a per-account watchlist in a hosted document
//! store. All heavy lifting is delegated to external services; this crate
//! is the component tree plus browser glue (local storage, redirects).
//!
//! Service clients and the logic worth testing live in `marquee-core`.

#![forbid(unsafe_code)]

pub mod components;
pub mod storage;
pub mod utils;
