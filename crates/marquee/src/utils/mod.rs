//! Small shared helpers for the UI layer.

pub mod browser;
pub mod formatting;
pub mod recent;
