//! Collaborator error type and the user-facing failure taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every async call site maps `ApiError` into a `FailureKind` before touching
//! visible state. No variant is fatal; each one ends in a screen that offers a
//! way back to sign-in.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure returned by the auth, data, or storage platform.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("response error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("not signed in")]
    NoSession,
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Whether a user retry (reload/resubmit) might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Unavailable => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Parse(_) | Self::Config(_) | Self::NoSession => false,
        }
    }

    /// Message suitable for inline display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// User-facing classification of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Expired or malformed recovery/confirmation link; needs a new link.
    InvalidLink,
    /// Network or platform hiccup; retried by user action only.
    Transient,
    /// Rejected before any network call.
    InvalidInput,
}

/// Terminal error shown by the router's error screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteError {
    pub kind: FailureKind,
    pub message: String,
}

pub const INVALID_RESET_LINK: &str = "Invalid or expired reset link.";
pub const INVALID_CONFIRMATION_LINK: &str = "Invalid confirmation link.";

impl RouteError {
    pub fn invalid_reset_link() -> Self {
        Self {
            kind: FailureKind::InvalidLink,
            message: INVALID_RESET_LINK.to_owned(),
        }
    }

    pub fn invalid_confirmation_link() -> Self {
        Self {
            kind: FailureKind::InvalidLink,
            message: INVALID_CONFIRMATION_LINK.to_owned(),
        }
    }

    /// Link failure whose kind reflects the underlying cause. The message
    /// stays the link message either way; the user still needs a new link.
    pub fn from_link_failure(base: Self, err: &ApiError) -> Self {
        let kind = if err.is_transient() {
            FailureKind::Transient
        } else {
            FailureKind::InvalidLink
        };
        Self { kind, ..base }
    }
}

/// Extract a readable message from a platform error body.
///
/// The auth endpoints answer with `msg` or `error_description`; the data
/// endpoints with `message`. Falls back to the trimmed raw body.
pub fn error_body_message(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    let from_json = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|value| {
        ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str).map(str::to_owned))
    });
    let message = from_json.unwrap_or_else(|| body.trim().to_owned());
    message.chars().take(MAX_CHARS).collect()
}
