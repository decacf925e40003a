//! Async wrapper around [`ApiClient`] for use in async runtimes (Tokio, etc.).
//!
//! Every call runs on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], so the blocking HTTP transport never
//! stalls the event loop.
//!
//! # Example
//!
//! ```no_run
//! use portfolio_client::AsyncPortfolioClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncPortfolioClient::builder().build().await.unwrap();
//!
//!     // Run any sync API method via closure
//!     let assets = client.run(|c| c.assets().list()).await.unwrap();
//!
//!     // Dashboard, assets and portfolios in parallel
//!     let (dashboard, assets, portfolios) = client.load_collections().await;
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::auth::Auth;
use crate::config::API_BASE_URL;
use crate::error::{ClientError, Result};
use crate::models::{Asset, DashboardSummary, Portfolio};
use crate::storage::{FileStore, KeyValueStore};
use crate::transport::{HttpTransport, Transport};

fn join_error(e: tokio::task::JoinError) -> ClientError {
    ClientError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncPortfolioClientBuilder
// ---------------------------------------------------------------------------

pub struct AsyncPortfolioClientBuilder {
    base_url: String,
    storage_dir: Option<PathBuf>,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl Default for AsyncPortfolioClientBuilder {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            storage_dir: None,
            timeout: Duration::from_secs(30),
            transport: None,
            store: None,
        }
    }
}

impl AsyncPortfolioClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the client. Opening the session file and the HTTP client runs
    /// on the blocking pool.
    pub async fn build(self) -> Result<AsyncPortfolioClient> {
        tokio::task::spawn_blocking(move || {
            let store: Arc<dyn KeyValueStore> = match self.store {
                Some(store) => store,
                None => Arc::new(FileStore::new(self.storage_dir)?),
            };
            let transport: Arc<dyn Transport> = match self.transport {
                Some(transport) => transport,
                None => Arc::new(HttpTransport::new(self.timeout)?),
            };
            let client = ApiClient::new(self.base_url, transport, Auth::new(store));
            Ok(AsyncPortfolioClient {
                inner: Arc::new(client),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncPortfolioClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`ApiClient`].
///
/// The client is `Sync`, so concurrent calls share it through an [`Arc`]
/// without a lock.
#[derive(Clone)]
pub struct AsyncPortfolioClient {
    inner: Arc<ApiClient>,
}

impl AsyncPortfolioClient {
    pub fn builder() -> AsyncPortfolioClientBuilder {
        AsyncPortfolioClientBuilder::default()
    }

    /// Run a sync API operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use portfolio_client::AsyncPortfolioClient;
    /// # async fn example() -> portfolio_client::Result<()> {
    /// # let client = AsyncPortfolioClient::builder().build().await?;
    /// let history = client.run(|c| c.assets().price_history(7)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ApiClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(join_error)?
    }

    /// Fetch dashboard, assets and portfolios concurrently. Each failure
    /// degrades to an empty value, as in the sync startup.
    pub async fn load_collections(&self) -> (Option<DashboardSummary>, Vec<Asset>, Vec<Portfolio>) {
        let (dashboard, assets, portfolios) = tokio::join!(
            self.run(|c| Ok(c.dashboard().load())),
            self.run(|c| Ok(c.assets().load())),
            self.run(|c| Ok(c.portfolios().load())),
        );
        (
            dashboard.ok().flatten(),
            assets.unwrap_or_default(),
            portfolios.unwrap_or_default(),
        )
    }

    pub async fn is_authenticated(&self) -> bool {
        self.run(|c| Ok(c.auth().is_authenticated()))
            .await
            .unwrap_or(false)
    }
}
