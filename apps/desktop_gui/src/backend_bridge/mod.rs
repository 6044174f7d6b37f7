//! Bridge between the UI thread and the tokio runtime that drives fetch runs.

pub mod commands;
pub mod runtime;
