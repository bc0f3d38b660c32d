//! Login and password change.

use dairy_ledger_core::forms::{Credentials, PasswordChange};
use dairy_ledger_core::{Role, UserId};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

/// What the backend returns for a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(alias = "id")]
    pub user_id: UserId,
    pub role: Role,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Serialize)]
struct ChangePasswordBody<'a> {
    user_id: UserId,
    #[serde(flatten)]
    change: &'a PasswordChange,
}

impl ApiClient {
    /// Authenticate with contact number and password.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the backend's message for bad
    /// credentials, or a transport error.
    #[instrument(skip(self, credentials), fields(contact = %credentials.contact))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginData, ClientError> {
        let data: LoginData = self.post(Endpoint::Login, credentials).await?;
        info!(user_id = %data.user_id, role = %data.role, "Logged in");
        Ok(data)
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the current password is wrong.
    #[instrument(skip(self, change), fields(user_id = %user_id))]
    pub async fn change_password(
        &self,
        user_id: UserId,
        change: &PasswordChange,
    ) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::ChangePassword, &ChangePasswordBody { user_id, change })
            .await
    }
}
