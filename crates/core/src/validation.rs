//! Field checks for form input.
//!
//! Each helper checks one field and returns the parsed value. Forms call
//! them in display order with `?`, so the first failing field aborts and is
//! the only message reported.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{AmountError, Phone, PhoneError, price::parse_positive_decimal};

/// Minimum password length accepted at login and on create forms.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A single form validation failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Form field that failed.
    pub field: &'static str,
    /// Message shown to the user.
    pub message: String,
}

impl ValidationError {
    /// Create an error for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Non-blank text, trimmed.
///
/// # Errors
///
/// Fails if the value is empty after trimming.
pub fn required(field: &'static str, label: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    Ok(value.to_owned())
}

/// A 10-digit phone number.
///
/// # Errors
///
/// Fails if the value is blank or not exactly ten digits.
pub fn phone(field: &'static str, label: &str, value: &str) -> Result<Phone, ValidationError> {
    Phone::parse(value).map_err(|e| match e {
        PhoneError::Empty => ValidationError::new(field, format!("{label} is required")),
        PhoneError::NonDigit | PhoneError::WrongLength { .. } => ValidationError::new(
            field,
            format!("{label} must be a {}-digit number", Phone::LENGTH),
        ),
    })
}

/// A password of at least [`MIN_PASSWORD_LENGTH`] characters. Not trimmed.
///
/// # Errors
///
/// Fails if the value is empty or too short.
pub fn password(field: &'static str, label: &str, value: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new(
            field,
            format!("{label} must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    Ok(value.to_owned())
}

/// A password that may be left blank (edit forms keep the current one).
///
/// # Errors
///
/// Fails if a non-empty value is too short.
pub fn optional_password(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<Option<String>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    password(field, label, value).map(Some)
}

/// A strictly positive decimal number.
///
/// # Errors
///
/// Fails if the value is blank, not numeric, or not above zero.
pub fn positive_number(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<Decimal, ValidationError> {
    parse_positive_decimal(value).map_err(|e| {
        let message = match e {
            AmountError::Empty => format!("{label} is required"),
            AmountError::NotANumber => format!("{label} must be a number"),
            AmountError::NotPositive => format!("{label} must be greater than zero"),
        };
        ValidationError::new(field, message)
    })
}

/// A calendar date written as `YYYY-MM-DD`.
///
/// # Errors
///
/// Fails if the value is blank, not in that exact shape, or not a real date.
pub fn iso_date(field: &'static str, label: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    let shaped = value.len() == 10
        && value.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    let invalid = || ValidationError::new(field, format!("{label} must be a date in YYYY-MM-DD format"));
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// A billing month written as `YYYY-MM`. Returned as typed, trimmed.
///
/// # Errors
///
/// Fails if the value is blank, not in that exact shape, or the month is
/// not 01-12.
pub fn month(field: &'static str, label: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    let invalid = || ValidationError::new(field, format!("{label} must be a month in YYYY-MM format"));
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return Err(invalid());
    }
    match month.parse::<u32>() {
        Ok(1..=12) => Ok(value.to_owned()),
        _ => Err(invalid()),
    }
}

/// A positive integer id picked from a list.
///
/// # Errors
///
/// Fails if the value is blank, not an integer, or not above zero.
pub fn id<T: From<i64>>(field: &'static str, label: &str, value: &str) -> Result<T, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    match value.parse::<i64>() {
        Ok(n) if n > 0 => Ok(T::from(n)),
        _ => Err(ValidationError::new(field, format!("Select a valid {}", label.to_lowercase()))),
    }
}

/// A value parsed by its `FromStr` impl, e.g. an enum picked from a list.
///
/// # Errors
///
/// Fails if the value is blank or does not parse.
pub fn choice<T: std::str::FromStr>(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<T, ValidationError> {
    let value = required(field, label, value)?;
    value
        .parse()
        .map_err(|_| ValidationError::new(field, format!("{label} is not a valid option")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::CustomerId;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "Name", "  Asha ").unwrap(), "Asha");
        let err = required("name", "Name", "   ").unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_phone_messages() {
        assert_eq!(
            phone("contact", "Contact", "987654321").unwrap_err().to_string(),
            "Contact must be a 10-digit number"
        );
        assert_eq!(
            phone("contact", "Contact", "").unwrap_err().to_string(),
            "Contact is required"
        );
    }

    #[test]
    fn test_password_length() {
        assert!(password("password", "Password", "abc12").is_err());
        assert!(password("password", "Password", "abc123").is_ok());
        assert_eq!(optional_password("password", "Password", "").unwrap(), None);
        assert!(optional_password("password", "Password", "abc").is_err());
    }

    #[test]
    fn test_positive_number() {
        assert_eq!(positive_number("q", "Quantity", "2.5").unwrap(), Decimal::new(25, 1));
        assert_eq!(
            positive_number("q", "Quantity", "0").unwrap_err().to_string(),
            "Quantity must be greater than zero"
        );
        assert_eq!(
            positive_number("q", "Quantity", "two").unwrap_err().to_string(),
            "Quantity must be a number"
        );
    }

    #[test]
    fn test_iso_date_is_strict() {
        assert!(iso_date("date", "Date", "2024-05-01").is_ok());
        assert!(iso_date("date", "Date", "2024-5-1").is_err());
        assert!(iso_date("date", "Date", "01-05-2024").is_err());
        assert!(iso_date("date", "Date", "2024-02-30").is_err());
        assert!(iso_date("date", "Date", "2024/05/01").is_err());
    }

    #[test]
    fn test_month_is_strict() {
        assert_eq!(month("month", "Month", " 2024-06 ").unwrap(), "2024-06");
        assert_eq!(month("month", "Month", "2024-12").unwrap(), "2024-12");
        for bad in ["2024-5", "May", "2024-13", "2024-00", "24-06", "2024-06-01", "2024/06"] {
            assert_eq!(
                month("month", "Month", bad).unwrap_err().to_string(),
                "Month must be a month in YYYY-MM format",
                "{bad}"
            );
        }
        assert_eq!(
            month("month", "Month", "").unwrap_err().to_string(),
            "Month is required"
        );
    }

    #[test]
    fn test_id_must_be_positive() {
        let customer: CustomerId = id("customer_id", "Customer", "7").unwrap();
        assert_eq!(customer, CustomerId::new(7));
        assert_eq!(
            id::<CustomerId>("customer_id", "Customer", "0").unwrap_err().to_string(),
            "Select a valid customer"
        );
    }
}
