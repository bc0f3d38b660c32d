//! The `{status, data, message}` wrapper every backend script answers with.

use serde::Deserialize;

use crate::error::ClientError;

/// Envelope status flag. Anything other than `"success"` is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    #[serde(other)]
    Error,
}

/// Backend response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Message for a failed envelope, with a fallback for blank ones.
    fn error_message(message: Option<String>) -> String {
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Something went wrong".to_string())
    }

    /// The `data` of a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the status is not `success`, and
    /// [`ClientError::Decode`] when a successful envelope has no data.
    pub fn into_data(self) -> Result<T, ClientError> {
        match self.status {
            EnvelopeStatus::Success => self
                .data
                .ok_or_else(|| ClientError::Decode("missing data in success envelope".to_string())),
            EnvelopeStatus::Error => Err(ClientError::Api(Self::error_message(self.message))),
        }
    }

    /// Acknowledge a mutation, returning the backend's message if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the status is not `success`.
    pub fn into_ack(self) -> Result<Option<String>, ClientError> {
        match self.status {
            EnvelopeStatus::Success => Ok(self.message),
            EnvelopeStatus::Error => Err(ClientError::Api(Self::error_message(self.message))),
        }
    }
}
