//! Price prediction endpoints.

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::{EvaluationRequest, EvaluationResult};

pub struct EvaluationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EvaluationApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Predict a price for an apartment or car description.
    pub fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult> {
        let options = RequestOptions::post(&request.to_value())?;
        let result: EvaluationResult = self.client.fetch(request.endpoint(), options)?;
        tracing::info!(
            asset_type = request.asset_type().as_str(),
            predicted_price = result.predicted_price,
            "Evaluation complete"
        );
        Ok(result)
    }
}
