//! Per-feature backend calls.
//!
//! Each submodule adds an `impl ApiClient` block for one backend script.
//! Mutations are POSTed as JSON with an `action` field naming the operation
//! alongside the payload's own fields.

mod addresses;
mod assignments;
mod auth;
mod customers;
mod deliveries;
mod payments;
mod sellers;
mod summary;

pub use auth::LoginData;

use serde::Serialize;

/// Mutation verb understood by the CRUD scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Action {
    Add,
    Edit,
    Delete,
}

/// POST body: `{"action": ..., <payload fields>}`.
#[derive(Debug, Serialize)]
pub(crate) struct Mutation<'a, B: Serialize> {
    action: Action,
    #[serde(flatten)]
    payload: &'a B,
}

impl<'a, B: Serialize> Mutation<'a, B> {
    pub(crate) const fn new(action: Action, payload: &'a B) -> Self {
        Self { action, payload }
    }
}

/// Payload of a delete: just the row id.
#[derive(Debug, Serialize)]
pub(crate) struct ById<I: Serialize> {
    pub(crate) id: I,
}
