//! Access gate: a shared-secret password check and the session marker it issues.

pub mod cookie;
pub mod form;
pub mod gate;
pub mod jar;

pub use form::PasswordForm;
pub use gate::{AccessGate, MarkerPolicy, PasswordVerifier, SharedSecret};
#[cfg(test)]
pub use jar::MemoryJar;
pub use jar::{CookieJar, FileJar};
