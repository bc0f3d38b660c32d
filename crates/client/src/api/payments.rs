//! Payments and the monthly "mark paid" toggle.

use dairy_ledger_core::{CustomerId, Payment, PaymentInput};
use serde::Serialize;
use tracing::instrument;

use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

#[derive(Serialize)]
struct MarkPaid<'a> {
    customer_id: CustomerId,
    month: &'a str,
}

impl ApiClient {
    /// Every payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_payments(&self) -> Result<Vec<Payment>, ClientError> {
        self.get(Endpoint::Payments, &[]).await
    }

    /// Payments made by one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn customer_payments(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Payment>, ClientError> {
        self.get(
            Endpoint::CustomerPayments,
            &[("customer_id", customer_id.to_string())],
        )
        .await
    }

    /// Append a payment record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id, amount = %input.amount))]
    pub async fn record_payment(&self, input: &PaymentInput) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::Payments, input).await
    }

    /// Mark a customer's bill for `month` (`YYYY-MM`) as paid.
    ///
    /// Independent of payment records: no payment row is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn mark_paid(
        &self,
        customer_id: CustomerId,
        month: &str,
    ) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::MarkPaid, &MarkPaid { customer_id, month })
            .await
    }
}
