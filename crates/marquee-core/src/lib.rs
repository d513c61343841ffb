//! # Marquee Core
//!
//! Platform-independent glue layer for the Marquee movie discovery app.
//!
//! Marquee itself is UI code (Dioxus, compiled to WebAssembly); everything
//! with a contract worth testing lives here so it can run natively under
//! plain `tokio::test`:
//!
//! - [`omdb`] - Client for the OMDB-compatible movie database API
//! - [`baas`] - REST client for the hosted backend (account sessions +
//!   document collections)
//! - [`watchlist`] - Per-user movie membership over the document store
//! - [`trending`] - Search-count bookkeeping and the trending rail
//! - [`config`] - Build-time service configuration
//! - [`error`] - Error types shared across the glue layer

#![forbid(unsafe_code)]

pub mod baas;
pub mod config;
pub mod error;
pub mod omdb;
pub mod time;
pub mod trending;
pub mod watchlist;
