//! Core types for Dairy Ledger.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod number;
pub mod phone;
pub mod price;
pub mod status;

pub use id::*;
pub use number::Lenient;
pub use phone::{Phone, PhoneError};
pub use price::{Amount, AmountError, CURRENCY_SYMBOL, Rate, price_for};
pub use status::*;
