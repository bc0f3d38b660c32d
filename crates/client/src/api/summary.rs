//! Monthly customer bill.

use dairy_ledger_core::{CustomerId, CustomerSummary};
use tracing::instrument;

use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

impl ApiClient {
    /// Bill for `customer_id` in `month` (`YYYY-MM`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn customer_summary(
        &self,
        customer_id: CustomerId,
        month: &str,
    ) -> Result<CustomerSummary, ClientError> {
        self.get(
            Endpoint::CustomerSummary,
            &[
                ("customer_id", customer_id.to_string()),
                ("month", month.to_string()),
            ],
        )
        .await
    }
}
