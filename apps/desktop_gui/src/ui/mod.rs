//! UI layer for the desktop grid: app shell, key translation, and details view.

pub mod app;
pub mod details;
pub mod keys;

pub use app::QuoteGridApp;
