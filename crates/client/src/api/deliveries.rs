//! Delivery (distribution) records.

use chrono::NaiveDate;
use dairy_ledger_core::{CustomerId, Delivery, DeliveryId, DeliveryInput, SellerId};
use serde::Serialize;
use tracing::instrument;

use super::{Action, ById, Mutation};
use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

#[derive(Serialize)]
struct RecordDelivery<'a> {
    seller_id: SellerId,
    #[serde(flatten)]
    input: &'a DeliveryInput,
}

impl ApiClient {
    /// What `seller_id` delivered on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_deliveries(
        &self,
        seller_id: SellerId,
        date: NaiveDate,
    ) -> Result<Vec<Delivery>, ClientError> {
        let deliveries = self
            .get(
                Endpoint::Distributions,
                &[("seller_id", seller_id.to_string()), ("date", date.to_string())],
            )
            .await?;
        Ok(self.priced(deliveries))
    }

    /// Every delivery made to one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn customer_deliveries(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Delivery>, ClientError> {
        let deliveries = self
            .get(
                Endpoint::CustomerHistory,
                &[("customer_id", customer_id.to_string())],
            )
            .await?;
        Ok(self.priced(deliveries))
    }

    /// Give every rateless row the configured rate, so totals and the
    /// per-row price agree.
    fn priced(&self, mut deliveries: Vec<Delivery>) -> Vec<Delivery> {
        let rate = self.default_rate();
        for delivery in &mut deliveries {
            delivery.fill_rate(rate);
        }
        deliveries
    }

    /// Record a delivery made by `seller_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id, date = %input.date))]
    pub async fn record_delivery(
        &self,
        seller_id: SellerId,
        input: &DeliveryInput,
    ) -> Result<Option<String>, ClientError> {
        let body = RecordDelivery { seller_id, input };
        self.post_ack(Endpoint::Distributions, &Mutation::new(Action::Add, &body))
            .await
    }

    /// Delete one delivery record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(delivery_id = %id))]
    pub async fn delete_delivery(&self, id: DeliveryId) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Distributions, &Mutation::new(Action::Delete, &ById { id }))
            .await
    }
}
