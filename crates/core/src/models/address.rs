//! Delivery areas.

use serde::{Deserialize, Serialize};

use crate::aggregate::{Measure, Measured};
use crate::listing::{Searchable, SortKey, SortValue, Sortable};
use crate::types::AddressId;

/// A named delivery area customers are grouped by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    #[serde(default, alias = "address", alias = "name")]
    pub label: String,
}

impl Searchable for Address {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.label]
    }
}

impl Sortable for Address {
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Name => Some(SortValue::Text(&self.label)),
            SortKey::Date | SortKey::Quantity => None,
        }
    }
}

impl Measured for Address {
    fn measure(&self, _measure: Measure) -> Option<f64> {
        None
    }
}

/// Validated payload for a new area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressInput {
    #[serde(rename = "address")]
    pub label: String,
}
