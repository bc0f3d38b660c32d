//! Seller (delivery person) records.

use serde::{Deserialize, Serialize};

use crate::aggregate::{Measure, Measured};
use crate::listing::{Searchable, SortKey, SortValue, Sortable};
use crate::types::{Phone, SellerId};

/// A seller as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default, alias = "vehicle_number")]
    pub vehicle_no: String,
}

impl Searchable for Seller {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.contact, &self.vehicle_no]
    }
}

impl Sortable for Seller {
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Name => Some(SortValue::Text(&self.name)),
            SortKey::Date | SortKey::Quantity => None,
        }
    }
}

impl Measured for Seller {
    fn measure(&self, _measure: Measure) -> Option<f64> {
        None
    }
}

/// Validated payload for creating or editing a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<SellerId>,
    pub name: String,
    pub contact: Phone,
    pub vehicle_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
