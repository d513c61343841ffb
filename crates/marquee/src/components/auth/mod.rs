//! Sign-in and registration forms.

mod login;
mod register;

pub use login::LoginView;
pub use register::RegisterView;
