//! Dairy Ledger Client - Backend access, session and list screens.
//!
//! # Layout
//!
//! - [`client`] - One-request-per-call HTTP transport and the endpoint table
//! - [`api`] - Feature calls (customers, sellers, deliveries, payments, ...)
//! - [`session`] - Signed-in session and per-user address selection
//! - [`snapshot`] - Offline fallback for the delivery and customer lists
//! - [`screen`] - List controllers and form submission
//! - [`store`] - Key-value persistence behind the session
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use dairy_ledger_client::{ApiClient, ClientConfig, FileStore, Session};
//!
//! let config = ClientConfig::new("https://dairy.example.in/api/")?;
//! let store = FileStore::new(&config.session_file);
//! let session = Session::load_required(&store)?;
//! let api = ApiClient::new(&config)?.with_token(session.token());
//! let customers = api.list_customers().await?;
//! # let _ = customers;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod screen;
pub mod session;
pub mod snapshot;
pub mod store;

pub use api::LoginData;
pub use client::{ApiClient, Endpoint};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, TransportKind};
pub use screen::{ListController, submit};
pub use session::{SelectedAddresses, Session};
pub use snapshot::{Fetched, Freshness, SnapshotCache, SnapshotScreen};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
