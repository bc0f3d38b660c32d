//! Seller management.

use dairy_ledger_core::{Seller, SellerId, SellerInput, ValidationError};
use tracing::instrument;

use super::{Action, ById, Mutation};
use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

impl ApiClient {
    /// Every seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_sellers(&self) -> Result<Vec<Seller>, ClientError> {
        self.get(Endpoint::Sellers, &[]).await
    }

    /// Create a seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_seller(&self, input: &SellerInput) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Sellers, &Mutation::new(Action::Add, input))
            .await
    }

    /// Update an existing seller.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `input` carries no id, otherwise an
    /// error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(seller_id = ?input.id))]
    pub async fn edit_seller(&self, input: &SellerInput) -> Result<Option<String>, ClientError> {
        if input.id.is_none() {
            return Err(ValidationError::new("id", "Select a seller to edit").into());
        }
        self.post_ack(Endpoint::Sellers, &Mutation::new(Action::Edit, input))
            .await
    }

    /// Delete one seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(seller_id = %id))]
    pub async fn delete_seller(&self, id: SellerId) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Sellers, &Mutation::new(Action::Delete, &ById { id }))
            .await
    }
}
