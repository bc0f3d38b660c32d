//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than ASCII digits.
    #[error("phone number must contain digits only")]
    NonDigit,
    /// The input has the wrong number of digits.
    #[error("phone number must be exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Number of digits supplied.
        actual: usize,
    },
}

/// A 10-digit mobile number.
///
/// Contacts double as login identifiers for sellers and customers, so the
/// format is fixed: exactly ten ASCII digits, no country code, no separators.
/// Surrounding whitespace is trimmed before checking.
///
/// ## Examples
///
/// ```
/// use dairy_ledger_core::Phone;
///
/// assert!(Phone::parse("9876543210").is_ok());
/// assert!(Phone::parse(" 9876543210 ").is_ok());
///
/// assert!(Phone::parse("").is_err());           // empty
/// assert!(Phone::parse("987654321").is_err());  // nine digits
/// assert!(Phone::parse("98765-43210").is_err()); // separator
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a valid phone number.
    pub const LENGTH: usize = 10;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, contains non-digit
    /// characters, or is not exactly ten digits long.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if s.len() != Self::LENGTH {
            return Err(PhoneError::WrongLength {
                expected: Self::LENGTH,
                actual: s.len(),
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Phone::parse("9876543210").is_ok());
        assert!(Phone::parse("0000000000").is_ok());
        assert_eq!(Phone::parse("  9123456780\n").unwrap().as_str(), "9123456780");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_nine_digits() {
        assert_eq!(
            Phone::parse("987654321"),
            Err(PhoneError::WrongLength {
                expected: 10,
                actual: 9
            })
        );
    }

    #[test]
    fn test_parse_eleven_digits() {
        assert!(matches!(
            Phone::parse("98765432101"),
            Err(PhoneError::WrongLength { actual: 11, .. })
        ));
    }

    #[test]
    fn test_parse_non_digit() {
        assert_eq!(Phone::parse("+919876543"), Err(PhoneError::NonDigit));
        assert_eq!(Phone::parse("98765 43210"), Err(PhoneError::NonDigit));
    }

    #[test]
    fn test_display_and_from_str() {
        let phone: Phone = "9876543210".parse().unwrap();
        assert_eq!(format!("{phone}"), "9876543210");
    }
}
