//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally passing a seller ID where a customer ID is expected.
//!
//! The backend is PHP and emits row ids either as JSON numbers or as numeric
//! strings depending on the endpoint, so every ID accepts both on input and
//! always serializes as a number.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize` as a plain number
/// - `Deserialize` from a number or a numeric string
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>`, `Into<i64>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use dairy_ledger_core::define_id;
/// define_id!(RouteId);
/// define_id!(TankerId);
///
/// let route = RouteId::new(1);
/// let tanker = TankerId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: RouteId = tanker;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::types::id::deserialize_raw_id(deserializer).map(Self)
            }
        }
    };
}

define_id!(UserId);
define_id!(CustomerId);
define_id!(SellerId);
define_id!(AddressId);
define_id!(DeliveryId);
define_id!(PaymentId);
define_id!(AssignmentId);

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Decode an id that may arrive as a number or a numeric string.
///
/// # Errors
///
/// Returns a deserialization error if the value is neither an integer nor a
/// string holding one.
#[doc(hidden)]
pub fn deserialize_raw_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match <RawId as serde::Deserialize>::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {s:?}"))),
    }
}

/// Decode an optional id, treating `null`, `""`, `0` and garbage as absent.
///
/// Use with `#[serde(default, deserialize_with = "...")]` on foreign-key
/// fields the backend leaves blank for unassigned rows.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: From<i64>,
{
    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
    let id = match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(id.filter(|id| *id != 0).map(T::from))
}
