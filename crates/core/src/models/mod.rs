//! Records exchanged with the backend.
//!
//! The client holds no authoritative state: these are plain rows as the
//! backend returns them, decoded leniently, plus the input payloads sent on
//! create/edit. Row ids are trusted to be unique.

mod address;
mod assignment;
mod customer;
mod delivery;
mod payment;
mod seller;
mod summary;

pub use address::{Address, AddressInput};
pub use assignment::{AssignmentInput, MilkAssignment};
pub use customer::{Customer, CustomerInput};
pub use delivery::{Delivery, DeliveryInput};
pub use payment::{Payment, PaymentInput};
pub use seller::{Seller, SellerInput};
pub use summary::CustomerSummary;

use chrono::NaiveDate;

/// Parse the `YYYY-MM-DD` prefix of a backend date or datetime string.
///
/// `"2024-05-01"` and `"2024-05-01 06:30:00"` both yield May 1st; anything
/// else (including MySQL's `"0000-00-00"`) yields `None`.
#[must_use]
pub fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
    let prefix = s.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_prefix() {
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(parse_date_prefix("2024-05-01"), may_first);
        assert_eq!(parse_date_prefix("2024-05-01 06:30:00"), may_first);
        assert_eq!(parse_date_prefix("0000-00-00"), None);
        assert_eq!(parse_date_prefix("yesterday"), None);
        assert_eq!(parse_date_prefix(""), None);
    }
}
