// Library surface for the binary and for integration tests.
pub mod app_dirs;
pub mod config;
pub mod hint;
pub mod i18n;
pub mod prefs;
pub mod round;
pub mod runtime;
pub mod score;
pub mod secret;
pub mod session;
pub mod style;
