//! Dairy Ledger Core - Shared types and list logic.
//!
//! This crate provides what every Dairy Ledger component shares:
//! - `client` - Typed HTTP client for the dairy backend
//! - `cli` - Role-aware command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O,
//! no HTTP clients, no persisted state. Everything here is unit-testable
//! without a backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, phone numbers, money and statuses
//! - [`models`] - Backend records and create/edit payloads
//! - [`listing`] - Filter, sort and paginate record lists
//! - [`aggregate`] - Quantity and amount totals over filtered lists
//! - [`validation`] / [`forms`] - First-failure form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod aggregate;
pub mod forms;
pub mod listing;
pub mod models;
pub mod types;
pub mod validation;

pub use aggregate::{Measure, Measured, Totals};
pub use forms::Form;
pub use listing::{ListState, PageView, Sort, SortDirection, SortKey, paginate};
pub use models::*;
pub use types::*;
pub use validation::ValidationError;
