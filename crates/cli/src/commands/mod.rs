//! Command implementations, one module per screen group.

pub mod addresses;
pub mod assign;
pub mod auth;
pub mod bill;
pub mod customers;
pub mod deliveries;
pub mod payments;
pub mod sellers;

pub use addresses::AddressAction;
pub use assign::AssignAction;
pub use customers::CustomerAction;
pub use deliveries::DeliveryAction;
pub use payments::PaymentAction;
pub use sellers::SellerAction;

use chrono::{Local, NaiveDate};
use clap::Args;
use dairy_ledger_client::{
    ApiClient, ClientConfig, ClientError, ConfigError, FileStore, ListController, Session,
    StoreError,
};
use dairy_ledger_core::listing::{Searchable, Sortable};
use dairy_ledger_core::validation;
use dairy_ledger_core::{Role, Sort, SortKey};
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Anything the client reports; its message is shown as is.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local session file could not be used.
    #[error("Session storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<validation::ValidationError> for CommandError {
    fn from(e: validation::ValidationError) -> Self {
        Self::Client(e.into())
    }
}

/// Everything a command needs: config, local store and an API client.
pub struct Context {
    pub config: ClientConfig,
    pub store: FileStore,
    api: ApiClient,
}

impl Context {
    /// Build from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or invalid.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// Build from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, CommandError> {
        let store = FileStore::new(&config.session_file);
        let api = ApiClient::new(&config)?;
        Ok(Self { config, store, api })
    }

    /// Client without credentials, for login.
    pub const fn anonymous_api(&self) -> &ApiClient {
        &self.api
    }

    /// The saved session, required to have `role`, plus a client carrying
    /// its token.
    ///
    /// # Errors
    ///
    /// Returns an error if no one is signed in or the role differs.
    pub fn signed_in_as(&self, role: Role) -> Result<(Session, ApiClient), CommandError> {
        let (session, api) = self.signed_in()?;
        session.require(role)?;
        Ok((session, api))
    }

    /// The saved session, any role, plus a client carrying its token.
    ///
    /// # Errors
    ///
    /// Returns an error if no one is signed in.
    pub fn signed_in(&self) -> Result<(Session, ApiClient), CommandError> {
        let session = Session::load_required(&self.store)?;
        let api = self.api.with_token(session.token());
        Ok((session, api))
    }

    /// Empty list controller with the configured page size.
    pub fn list<T: Searchable + Sortable>(&self) -> ListController<T> {
        ListController::new(self.config.page_size)
    }
}

/// Search, sort and page flags shared by every `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text to search for
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort by `date`, `quantity` or `name` (default: backend order)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show (clamped to the pages that exist)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl ListArgs {
    /// Apply the flags to `list` and settle on a valid page.
    pub fn apply<T: Searchable + Sortable>(&self, list: &mut ListController<T>) {
        let state = list.state_mut();
        state.set_filter(self.search.clone());
        state.set_sort(self.sort.map(|key| {
            if self.desc {
                Sort::descending(key)
            } else {
                Sort::ascending(key)
            }
        }));
        let total_pages = list.view().total_pages();
        list.state_mut().go_to(self.page, total_pages);
    }
}

/// Today's date as seen by the operator.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM` for the current month.
pub fn current_month() -> String {
    today().format("%Y-%m").to_string()
}
