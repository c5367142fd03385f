//! Outcome of loading one dashboard panel.
//!
//! A failed source degrades its own panel to a message; the rest of the
//! dashboard keeps rendering.

#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Ready(T),
    Unavailable { message: String },
}

impl<T> Panel<T> {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Panel::Unavailable {
            message: message.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(v) => Some(v),
            Panel::Unavailable { .. } => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Panel::Ready(v) => Some(v),
            Panel::Unavailable { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Panel::Ready(_) => None,
            Panel::Unavailable { message } => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Panel<U> {
        match self {
            Panel::Ready(v) => Panel::Ready(f(v)),
            Panel::Unavailable { message } => Panel::Unavailable { message },
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Panel<U>) -> Panel<U> {
        match self {
            Panel::Ready(v) => f(v),
            Panel::Unavailable { message } => Panel::Unavailable { message },
        }
    }
}
