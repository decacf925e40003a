//! Portfolio tracker client for Rust.
//!
//! A headless rendition of the portfolio tracker's single-page front end:
//! apartments and cars held in portfolios, priced by the evaluation service
//! and optionally listed on the marketplace. All data comes from the tracker's
//! REST API; views render into an in-memory [`Document`] and dialogs go
//! through a [`Host`].
//!
//! # Quick start
//!
//! ```no_run
//! use portfolio_client::forms::FormData;
//! use portfolio_client::PortfolioApp;
//!
//! let mut app = PortfolioApp::builder()
//!     .base_url("http://localhost:8000/api")
//!     .build()
//!     .unwrap();
//!
//! // Redirects to the login page without a stored token
//! if app.init() {
//!     println!("{} assets", app.state().assets.len());
//!
//!     // Buttons in rendered views carry a data-action; feed it back in
//!     let args = FormData::from_pairs([("view", "evaluate")]);
//!     app.dispatch("navigate", &args);
//! }
//! ```

pub mod api;
pub mod app;
#[cfg(feature = "async")]
pub mod async_client;
pub mod auth;
pub mod config;
pub mod districts;
pub mod dom;
pub mod error;
pub mod format;
pub mod forms;
pub mod host;
pub mod models;
pub mod registry;
pub mod router;
pub mod state;
pub mod storage;
pub mod transport;
pub mod views;

pub use api::ApiClient;
pub use app::{PortfolioApp, PortfolioAppBuilder};
#[cfg(feature = "async")]
pub use async_client::AsyncPortfolioClient;
pub use auth::Auth;
pub use dom::Document;
pub use error::{ClientError, Result};
pub use host::{Host, LoggingHost};
pub use router::View;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{HttpTransport, Transport};
