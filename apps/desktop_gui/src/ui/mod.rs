//! UI layer for the desktop shortener: app shell and form rendering.

pub mod app;

pub use app::{ShortlyApp, StartupConfig};
