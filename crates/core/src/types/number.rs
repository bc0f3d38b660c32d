//! Tolerant numeric fields.
//!
//! Backend rows carry quantities and amounts as JSON numbers, numeric
//! strings, empty strings or `null`, depending on the endpoint. [`Lenient`]
//! accepts all of them and keeps the original text so it can be shown back
//! unchanged.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A numeric field that never fails to decode.
///
/// Values that are missing or not numeric decode to [`Lenient::value`] of
/// `None`; aggregations treat those as zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lenient {
    raw: String,
    value: Option<f64>,
}

impl Lenient {
    /// Build from text, parsing it if it looks numeric.
    #[must_use]
    pub fn from_text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite());
        Self { raw, value }
    }

    /// Build from a known number.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self {
            raw: value.to_string(),
            value: value.is_finite().then_some(value),
        }
    }

    /// The parsed value, if the field held a finite number.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// The parsed value, or zero.
    #[must_use]
    pub fn or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    /// The text as received.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Lenient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<f64> for Lenient {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<&str> for Lenient {
    fn from(raw: &str) -> Self {
        Self::from_text(raw)
    }
}

impl Serialize for Lenient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Lenient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Number(n) => {
                n.as_f64().map_or_else(|| Self::from_text(n.to_string()), |v| Self {
                    raw: n.to_string(),
                    value: Some(v),
                })
            }
            serde_json::Value::String(s) => Self::from_text(s),
            serde_json::Value::Null => Self::default(),
            other => Self {
                raw: other.to_string(),
                value: None,
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default)]
        quantity: Lenient,
    }

    #[test]
    fn test_decodes_number_and_string() {
        let a: Row = serde_json::from_str(r#"{"quantity": 2.5}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"quantity": "2.5"}"#).unwrap();
        assert_eq!(a.quantity.value(), Some(2.5));
        assert_eq!(b.quantity.value(), Some(2.5));
        assert_eq!(b.quantity.raw(), "2.5");
    }

    #[test]
    fn test_missing_null_and_garbage_are_none() {
        let missing: Row = serde_json::from_str("{}").unwrap();
        let null: Row = serde_json::from_str(r#"{"quantity": null}"#).unwrap();
        let garbage: Row = serde_json::from_str(r#"{"quantity": "two"}"#).unwrap();
        let object: Row = serde_json::from_str(r#"{"quantity": {"a": 1}}"#).unwrap();
        for row in [missing, null, garbage, object] {
            assert_eq!(row.quantity.value(), None);
            assert!(row.quantity.or_zero().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_non_finite_text_is_none() {
        assert_eq!(Lenient::from_text("NaN").value(), None);
        assert_eq!(Lenient::from_text("inf").value(), None);
    }
}
