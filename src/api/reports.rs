//! PDF evaluation reports.

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::Evaluation;

pub struct ReportsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Render the report for `evaluation` and return the PDF bytes.
    pub fn download(&self, evaluation: &Evaluation) -> Result<Vec<u8>> {
        let payload = evaluation.report_payload();
        let endpoint = evaluation.request.report_endpoint();
        let response = self
            .client
            .execute(endpoint, RequestOptions::post(&payload)?)?;
        tracing::info!(endpoint, size = response.body.len(), "Report downloaded");
        Ok(response.body)
    }
}
