//! Daily milk assignment to sellers.

use chrono::NaiveDate;
use dairy_ledger_core::{AssignmentInput, MilkAssignment};
use tracing::instrument;

use crate::client::{ApiClient, Endpoint};
use crate::error::ClientError;

impl ApiClient {
    /// Assign a quantity of milk to a seller for a date.
    ///
    /// The backend does not cap the total assigned per day.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(seller_id = %input.seller_id, date = %input.date))]
    pub async fn assign_milk(&self, input: &AssignmentInput) -> Result<Option<String>, ClientError> {
        self.post_ack(Endpoint::AssignMilk, input).await
    }

    /// Assignments made for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_assignments(&self, date: NaiveDate) -> Result<Vec<MilkAssignment>, ClientError> {
        self.get(Endpoint::AssignMilk, &[("date", date.to_string())])
            .await
    }
}
