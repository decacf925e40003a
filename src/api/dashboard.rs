//! `GET /dashboard/`.

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::DashboardSummary;

pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn summary(&self) -> Result<DashboardSummary> {
        self.client.fetch("/dashboard/", RequestOptions::get())
    }

    /// The summary, or `None` when the request fails.
    pub fn load(&self) -> Option<DashboardSummary> {
        self.summary()
            .map_err(|e| tracing::error!("Error loading dashboard data: {}", e))
            .ok()
    }
}
