//! Customer management.

use dairy_ledger_core::{AddressId, Customer, CustomerId, CustomerInput, ValidationError};
use tracing::instrument;

use super::{Action, ById, Mutation};
use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

impl ApiClient {
    /// Every customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ClientError> {
        self.get(Endpoint::Customers, &[]).await
    }

    /// Customers living in any of `areas`, for a seller's round.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn customers_by_area(
        &self,
        areas: &[AddressId],
    ) -> Result<Vec<Customer>, ClientError> {
        let ids = areas
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.get(Endpoint::CustomersByArea, &[("address_ids", ids)])
            .await
    }

    /// One customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if no such customer exists.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ClientError> {
        self.get(Endpoint::Customers, &[("id", id.to_string())])
            .await
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_customer(&self, input: &CustomerInput) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Customers, &Mutation::new(Action::Add, input))
            .await
    }

    /// Update an existing customer.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `input` carries no id, otherwise an
    /// error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(customer_id = ?input.id))]
    pub async fn edit_customer(&self, input: &CustomerInput) -> Result<Option<String>, ClientError> {
        if input.id.is_none() {
            return Err(ValidationError::new("id", "Select a customer to edit").into());
        }
        self.post_ack(Endpoint::Customers, &Mutation::new(Action::Edit, input))
            .await
    }

    /// Delete one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Customers, &Mutation::new(Action::Delete, &ById { id }))
            .await
    }
}
