//! `/portfolios/` endpoints.

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::{NewPortfolio, Portfolio};

pub struct PortfoliosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PortfoliosApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Portfolio>> {
        self.client.fetch_list("/portfolios/", RequestOptions::get())
    }

    /// All portfolios, or an empty list when the request fails.
    pub fn load(&self) -> Vec<Portfolio> {
        self.list().unwrap_or_else(|e| {
            tracing::error!("Error loading portfolios: {}", e);
            Vec::new()
        })
    }

    pub fn create(&self, name: &str, description: &str) -> Result<Portfolio> {
        let body = NewPortfolio {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.client.fetch("/portfolios/", RequestOptions::post(&body)?)
    }
}
