//! Delivery areas.

use dairy_ledger_core::{Address, AddressId, AddressInput};
use tracing::instrument;

use super::{Action, ById, Mutation};
use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

impl ApiClient {
    /// Every area.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_addresses(&self) -> Result<Vec<Address>, ClientError> {
        self.get(Endpoint::Addresses, &[]).await
    }

    /// Add an area.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(label = %input.label))]
    pub async fn add_address(&self, input: &AddressInput) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Addresses, &Mutation::new(Action::Add, input))
            .await
    }

    /// Remove an area.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(address_id = %id))]
    pub async fn delete_address(&self, id: AddressId) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Addresses, &Mutation::new(Action::Delete, &ById { id }))
            .await
    }
}
