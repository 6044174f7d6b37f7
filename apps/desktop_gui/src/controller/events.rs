//! UI/backend events and error modeling for the desktop grid.

use shared::protocol::FetchEvent;

pub enum UiEvent {
    Info(String),
    Fetch(FetchEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Runtime,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Launch,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Runtime => "Runtime",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("disconnected")
            || message_lower.contains("queue")
            || message_lower.contains("channel")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("runtime")
            || message_lower.contains("worker")
            || message_lower.contains("thread")
        {
            UiErrorCategory::Runtime
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Errors after which no further fetch can start.
    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
            || (self.category == UiErrorCategory::Transport
                && self.message.to_ascii_lowercase().contains("disconnected"))
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
