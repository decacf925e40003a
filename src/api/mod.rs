//! REST API client.
//!
//! [`ApiClient::call`] is the single request path: it resolves the endpoint
//! against the base URL, injects the auth and content-type headers, and
//! returns the raw response whatever its status. The resource modules wrap it
//! in typed, borrowing interfaces obtained from the client
//! (`client.assets()`, `client.marketplace()`, ...).

pub mod assets;
pub mod catalog;
pub mod dashboard;
pub mod evaluation;
pub mod marketplace;
pub mod portfolios;
pub mod profile;
pub mod reports;

pub use assets::AssetsApi;
pub use catalog::CatalogApi;
pub use dashboard::DashboardApi;
pub use evaluation::EvaluationApi;
pub use marketplace::MarketplaceApi;
pub use portfolios::PortfoliosApi;
pub use profile::ProfileApi;
pub use reports::ReportsApi;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Auth;
use crate::error::{ClientError, Result};
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

// ---------------------------------------------------------------------------
// RequestOptions
// ---------------------------------------------------------------------------

/// Per-call options for [`ApiClient::call`]. Defaults to a bodiless `GET`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    /// Caller headers; these replace defaults of the same name.
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Self::default()
        }
    }

    pub fn post<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Ok(Self {
            method: Method::Post,
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    pub fn patch<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Ok(Self {
            method: Method::Patch,
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Authenticated client for the portfolio REST API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, auth: Auth) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Send a request to `endpoint` (a path such as `/assets/`).
    ///
    /// Non-2xx statuses are returned, not raised; only transport failures
    /// are errors.
    pub fn call(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.auth.get_token() {
            headers.push(("Authorization".to_string(), format!("Token {}", token)));
        }
        for (name, value) in options.headers {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        let request = ApiRequest {
            method: options.method,
            url: format!("{}{}", self.base_url, endpoint),
            path: endpoint.to_string(),
            query: options.query,
            headers,
            body: options.body,
        };

        tracing::debug!(method = request.method.as_str(), path = endpoint, "API call");
        let response = self.transport.send(&request)?;
        if response.ok() {
            tracing::debug!(status = response.status, path = endpoint, "API response");
        } else {
            tracing::warn!(
                status = response.status,
                path = endpoint,
                "API call failed: {}",
                response.text().trim()
            );
        }
        Ok(response)
    }

    /// `call` and decode a 2xx JSON body; a non-2xx status becomes
    /// [`ClientError::Api`].
    pub(crate) fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let response = self.call(endpoint, options)?;
        if !response.ok() {
            return Err(ClientError::from_response(&response));
        }
        response.json()
    }

    /// `call` and ignore a 2xx body.
    pub(crate) fn execute(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        let response = self.call(endpoint, options)?;
        if !response.ok() {
            return Err(ClientError::from_response(&response));
        }
        Ok(response)
    }

    /// Like [`fetch`](Self::fetch) for collection endpoints, accepting both a
    /// bare array and a paginated `{"results": [...]}` page.
    pub(crate) fn fetch_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Vec<T>> {
        let page: ListPage<T> = self.fetch(endpoint, options)?;
        Ok(page.into_vec())
    }

    // -- Resource accessors -------------------------------------------------

    pub fn assets(&self) -> AssetsApi<'_> {
        AssetsApi::new(self)
    }

    pub fn portfolios(&self) -> PortfoliosApi<'_> {
        PortfoliosApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    pub fn evaluation(&self) -> EvaluationApi<'_> {
        EvaluationApi::new(self)
    }

    /// Car brands, models and model specs.
    pub fn catalog(&self) -> CatalogApi<'_> {
        CatalogApi::new(self)
    }

    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi::new(self)
    }

    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    pub fn marketplace(&self) -> MarketplaceApi<'_> {
        MarketplaceApi::new(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListPage<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> ListPage<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListPage::Plain(items) => items,
            ListPage::Paged { results } => results,
        }
    }
}
