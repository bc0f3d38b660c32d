//! Client-side errors.
//!
//! Every failure a screen can hit ends up as a [`ClientError`] whose
//! `Display` text is what the user is shown. Nothing is retried.

use dairy_ledger_core::{Role, ValidationError};
use thiserror::Error;

use crate::store::StoreError;

/// Why a request never produced a usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The configured timeout elapsed.
    Timeout,
    /// No connection could be made.
    Connect,
    /// Any other I/O failure while sending or reading.
    Other,
}

/// Errors that can occur when talking to the dairy backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Form input was rejected before any request was made.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Network failure: timeout, refused connection, broken stream.
    #[error("Failed to connect to server")]
    Transport {
        kind: TransportKind,
        detail: String,
    },

    /// Backend answered with a non-2xx status.
    #[error("Failed to connect to server (HTTP {status})")]
    Http { status: u16 },

    /// Backend answered `status: "error"`; the message is shown verbatim.
    #[error("{0}")]
    Api(String),

    /// An endpoint URL could not be built from the configured base.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body was not the expected envelope.
    #[error("Unexpected response from server")]
    Decode(String),

    /// Local session storage failed.
    #[error("Session storage error: {0}")]
    Store(#[from] StoreError),

    /// No one is signed in.
    #[error("Please log in first")]
    NotSignedIn,

    /// Signed in with a role that cannot use this screen.
    #[error("This action requires the {required} role (signed in as {actual})")]
    Forbidden { required: Role, actual: Role },
}

impl ClientError {
    /// Whether the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        )
    }

    /// Whether the failure happened before or instead of a backend answer,
    /// so a cached read may stand in.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Message for the toast/alert shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Decode(e.to_string());
        }
        if let Some(status) = e.status() {
            return Self::Http {
                status: status.as_u16(),
            };
        }
        let kind = if e.is_timeout() {
            TransportKind::Timeout
        } else if e.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };
        Self::Transport {
            kind,
            detail: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ClientError::Transport {
            kind: TransportKind::Timeout,
            detail: "operation timed out".to_string(),
        };
        assert!(err.is_timeout());
        assert!(err.is_offline());
        assert_eq!(err.user_message(), "Failed to connect to server");

        let err = ClientError::Api("Customer already exists".to_string());
        assert!(!err.is_offline());
        assert_eq!(err.user_message(), "Customer already exists");

        let err = ClientError::from(ValidationError::new("contact", "Contact must be a 10-digit number"));
        assert_eq!(err.user_message(), "Contact must be a 10-digit number");
    }

    #[test]
    fn test_forbidden_message() {
        let err = ClientError::Forbidden {
            required: Role::Admin,
            actual: Role::Seller,
        };
        assert_eq!(
            err.to_string(),
            "This action requires the admin role (signed in as seller)"
        );
    }
}
