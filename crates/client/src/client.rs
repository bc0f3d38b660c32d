//! HTTP transport for the dairy backend.
//!
//! Every feature call goes through [`ApiClient::get`] or [`ApiClient::post`]:
//! one request, the configured timeout, optional bearer token, and the
//! response envelope unwrapped into data or a [`ClientError`]. Nothing is
//! retried or queued.

use std::fmt;
use std::sync::Arc;

use dairy_ledger_core::Rate;
use reqwest::Response;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::ClientError;

/// A backend script, plus the `path` query value for scripts that serve
/// more than one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    ChangePassword,
    Customers,
    CustomersByArea,
    Sellers,
    Addresses,
    AssignMilk,
    Distributions,
    CustomerHistory,
    Payments,
    CustomerPayments,
    MarkPaid,
    CustomerSummary,
}

impl Endpoint {
    /// Script file name, relative to the backend root.
    #[must_use]
    pub const fn script(self) -> &'static str {
        match self {
            Self::Login => "login.php",
            Self::ChangePassword => "change_password.php",
            Self::Customers | Self::CustomersByArea => "customers.php",
            Self::Sellers => "sellers.php",
            Self::Addresses => "addresses.php",
            Self::AssignMilk => "assign_milk.php",
            Self::Distributions | Self::CustomerHistory => "distribution.php",
            Self::Payments | Self::CustomerPayments | Self::MarkPaid => "payments.php",
            Self::CustomerSummary => "customer_summary.php",
        }
    }

    /// Value of the `path` query parameter, if the script routes on it.
    #[must_use]
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::CustomersByArea => Some("customers_by_area"),
            Self::CustomerHistory => Some("customer_history"),
            Self::CustomerPayments => Some("customer_payments"),
            Self::MarkPaid => Some("mark_paid"),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}?path={path}", self.script()),
            None => f.write_str(self.script()),
        }
    }
}

/// Client for the dairy backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    default_rate: Rate,
    token: Option<SecretString>,
}

impl ApiClient {
    /// Create a client for `config.base_url` with `config.timeout` applied
    /// to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dairy-ledger/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
                default_rate: config.default_rate,
                token: None,
            }),
        })
    }

    /// A client that sends `token` as a bearer credential.
    #[must_use]
    pub fn with_token(&self, token: Option<SecretString>) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: self.inner.http.clone(),
                base_url: self.inner.base_url.clone(),
                default_rate: self.inner.default_rate,
                token,
            }),
        }
    }

    /// Backend root.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Rate applied to delivery rows that carry none of their own.
    #[must_use]
    pub fn default_rate(&self) -> Rate {
        self.inner.default_rate
    }

    fn url(&self, endpoint: Endpoint) -> Result<Url, ClientError> {
        let mut url = self.inner.base_url.join(endpoint.script())?;
        if let Some(path) = endpoint.path() {
            url.query_pairs_mut().append_pair("path", path);
        }
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// GET `endpoint` with extra query parameters and return the envelope data.
    #[instrument(skip(self, query), fields(endpoint = %endpoint))]
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let request = self.inner.http.get(self.url(endpoint)?).query(query);
        let response = self.authorize(request).send().await.inspect_err(|e| {
            warn!(error = %e, "Request failed");
        })?;
        let envelope: Envelope<T> = self.handle_response(response).await?;
        envelope.into_data()
    }

    /// POST a JSON body to `endpoint` and return the envelope data.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, ClientError> {
        let envelope: Envelope<T> = self.send_post(endpoint, body).await?;
        envelope.into_data()
    }

    /// POST a JSON body to `endpoint` where only success matters.
    ///
    /// Returns the backend's confirmation message, if it sent one.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub(crate) async fn post_ack<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<Option<String>, ClientError> {
        let envelope: Envelope<IgnoredAny> = self.send_post(endpoint, body).await?;
        envelope.into_ack()
    }

    async fn send_post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<Envelope<T>, ClientError> {
        let request = self.inner.http.post(self.url(endpoint)?).json(body);
        let response = self.authorize(request).send().await.inspect_err(|e| {
            warn!(error = %e, "Request failed");
        })?;
        self.handle_response(response).await
    }

    /// Decode a response into an envelope.
    ///
    /// A non-2xx status fails with [`ClientError::Http`] unless the body is
    /// itself an error envelope, whose message is then preferred.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<Envelope<T>, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_slice::<Envelope<IgnoredAny>>(&body) {
                let err = envelope.into_ack().err();
                if let Some(err @ ClientError::Api(_)) = err {
                    error!(status = status.as_u16(), error = %err, "Backend rejected request");
                    return Err(err);
                }
            }
            error!(status = status.as_u16(), "Backend returned an error status");
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body).inspect_err(|e| {
            error!(error = %e, "Response is not a valid envelope");
        })?;
        debug!(status = ?envelope.status, "Envelope received");
        Ok(envelope)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &self.inner.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}
