//! Daily milk assigned to sellers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::parse_date_prefix;
use crate::aggregate::{Measure, Measured};
use crate::listing::{Searchable, SortKey, SortValue, Sortable};
use crate::types::{AssignmentId, Lenient, SellerId};

/// Litres handed to a seller for one day's round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilkAssignment {
    pub id: AssignmentId,
    pub seller_id: SellerId,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub quantity: Lenient,
}

impl Searchable for MilkAssignment {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.seller_name, &self.date]
    }
}

impl Sortable for MilkAssignment {
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Date => parse_date_prefix(&self.date).map(SortValue::Date),
            SortKey::Quantity => self.quantity.value().map(SortValue::Number),
            SortKey::Name => Some(SortValue::Text(&self.seller_name)),
        }
    }
}

impl Measured for MilkAssignment {
    fn measure(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Quantity => self.quantity.value(),
            Measure::Amount => None,
        }
    }
}

/// Validated payload for assigning milk to a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentInput {
    pub seller_id: SellerId,
    pub date: NaiveDate,
    pub quantity: Decimal,
}
