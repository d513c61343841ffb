//! App shell components: AppBar and Footer, the persistent frame around
//! the active view.

mod appbar;
mod footer;

pub use appbar::{AppBar, View};
pub use footer::Footer;
