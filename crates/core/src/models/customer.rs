//! Customer records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::parse_date_prefix;
use crate::aggregate::{Measure, Measured};
use crate::listing::{Searchable, SortKey, SortValue, Sortable};
use crate::types::{AddressId, CustomerId, Lenient, Phone, Rate};

/// A milk customer as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    /// Area the customer lives in.
    #[serde(default, deserialize_with = "crate::types::id::optional")]
    pub address_id: Option<AddressId>,
    /// Area label, when the endpoint joins it in.
    #[serde(default, alias = "address_name")]
    pub address: Option<String>,
    /// Price per litre charged to this customer.
    #[serde(default)]
    pub price: Lenient,
    #[serde(default)]
    pub join_date: String,
    /// Daily litres.
    #[serde(default)]
    pub milk_quantity: Lenient,
}

impl Customer {
    /// The customer's own rate, if the backend sent a positive number.
    #[must_use]
    pub fn rate(&self) -> Option<Rate> {
        self.price
            .raw()
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|d| *d > Decimal::ZERO)
            .map(Rate::new)
    }

    /// Join date, if well-formed.
    #[must_use]
    pub fn joined_on(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.join_date)
    }
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.contact.as_str()];
        if let Some(address) = &self.address {
            fields.push(address);
        }
        fields
    }
}

impl Sortable for Customer {
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Date => self.joined_on().map(SortValue::Date),
            SortKey::Quantity => self.milk_quantity.value().map(SortValue::Number),
            SortKey::Name => Some(SortValue::Text(&self.name)),
        }
    }
}

impl Measured for Customer {
    fn measure(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Quantity => self.milk_quantity.value(),
            Measure::Amount => None,
        }
    }
}

/// Validated payload for creating or editing a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub name: String,
    pub contact: Phone,
    pub address_id: AddressId,
    pub price: Rate,
    pub join_date: NaiveDate,
    pub milk_quantity: Decimal,
    /// Login password; omitted on edit to keep the current one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
