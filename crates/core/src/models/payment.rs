//! Payment records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse_date_prefix;
use crate::aggregate::{Measure, Measured};
use crate::listing::{Searchable, SortKey, SortValue, Sortable};
use crate::types::{Amount, CustomerId, Lenient, PaymentId, PaymentMethod, PaymentStatus};

/// A payment made by (or recorded against) a customer.
///
/// Append-only from the client's side; only the status can change, through
/// the separate "mark paid" call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default, alias = "contact")]
    pub phone: String,
    #[serde(default)]
    pub amount: Lenient,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default, alias = "payment_date", alias = "timestamp")]
    pub created_at: String,
}

impl Payment {
    /// Day the payment was recorded, if well-formed.
    #[must_use]
    pub fn paid_on(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.created_at)
    }
}

impl Searchable for Payment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.customer_name,
            &self.phone,
            self.method.as_str(),
            self.status.as_str(),
        ]
    }
}

impl Sortable for Payment {
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Date => self.paid_on().map(SortValue::Date),
            SortKey::Quantity => self.amount.value().map(SortValue::Number),
            SortKey::Name => Some(SortValue::Text(&self.customer_name)),
        }
    }
}

impl Measured for Payment {
    fn measure(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Quantity => None,
            Measure::Amount => self.amount.value(),
        }
    }
}

/// Validated payload for recording a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInput {
    pub customer_id: CustomerId,
    pub amount: Amount,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}
