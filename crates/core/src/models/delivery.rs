//! Delivery (distribution) records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::parse_date_prefix;
use crate::aggregate::{Measure, Measured};
use crate::listing::{Searchable, SortKey, SortValue, Sortable};
use crate::types::{Amount, CustomerId, DeliveryId, Lenient, Rate, SellerId, price_for};

/// Milk delivered by a seller to a customer on one day.
///
/// The price is not stored: it is `quantity × rate`, where the rate is the
/// row's own rate if the backend joined one in, else the screen's rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    #[serde(default, deserialize_with = "crate::types::id::optional")]
    pub seller_id: Option<SellerId>,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub quantity: Lenient,
    #[serde(default, alias = "price")]
    pub rate: Lenient,
}

impl Delivery {
    /// Delivery date, if well-formed.
    #[must_use]
    pub fn delivered_on(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.date)
    }

    /// The row's own positive rate, if any.
    #[must_use]
    pub fn own_rate(&self) -> Option<Rate> {
        self.rate
            .raw()
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|d| *d > Decimal::ZERO)
            .map(Rate::new)
    }

    /// Price of this delivery, falling back to `default_rate`.
    #[must_use]
    pub fn price(&self, default_rate: Rate) -> Amount {
        price_for(self.quantity.raw(), self.own_rate().unwrap_or(default_rate))
    }

    /// Set `rate` on a row that has no positive rate of its own.
    pub fn fill_rate(&mut self, rate: Rate) {
        if self.own_rate().is_none() {
            self.rate = Lenient::from_text(rate.to_string());
        }
    }
}

impl Searchable for Delivery {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.customer_name, &self.seller_name, &self.date]
    }
}

impl Sortable for Delivery {
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Date => self.delivered_on().map(SortValue::Date),
            SortKey::Quantity => self.quantity.value().map(SortValue::Number),
            SortKey::Name => Some(SortValue::Text(&self.customer_name)),
        }
    }
}

impl Measured for Delivery {
    fn measure(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Quantity => self.quantity.value(),
            Measure::Amount => self.own_rate().map(|rate| self.price(rate).to_f64()),
        }
    }
}

/// Validated payload for recording a delivery.
///
/// The seller id comes from the signed-in session, not from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryInput {
    pub customer_id: CustomerId,
    pub date: NaiveDate,
    pub quantity: Decimal,
}
