//! Monthly bill summaries.

use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, Lenient, PaymentStatus};

/// One customer's bill for one month, as computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: CustomerId,
    /// `YYYY-MM`.
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub total_quantity: Lenient,
    #[serde(default)]
    pub total_amount: Lenient,
    #[serde(default)]
    pub paid_amount: Lenient,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl CustomerSummary {
    /// Amount still owed; never negative.
    #[must_use]
    pub fn due(&self) -> f64 {
        (self.total_amount.or_zero() - self.paid_amount.or_zero()).max(0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_due_is_clamped_at_zero() {
        let summary: CustomerSummary = serde_json::from_str(
            r#"{"customer_id": 1, "month": "2024-05", "total_amount": "1920", "paid_amount": "2000", "status": "Paid"}"#,
        )
        .unwrap();
        assert_eq!(summary.due(), 0.0);

        let summary: CustomerSummary = serde_json::from_str(
            r#"{"customer_id": 1, "total_amount": 1920, "paid_amount": "500"}"#,
        )
        .unwrap();
        assert_eq!(summary.due(), 1420.0);
        assert_eq!(summary.status, PaymentStatus::Pending);
    }
}
