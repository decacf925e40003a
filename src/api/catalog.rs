//! Car catalog: brands, models per brand, specs per model.

use serde::Deserialize;

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::CarSpecs;

#[derive(Deserialize)]
struct BrandList {
    #[serde(default)]
    brands: Vec<String>,
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<String>,
}

pub struct CatalogApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CatalogApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn brands(&self) -> Result<Vec<String>> {
        let list: BrandList = self.client.fetch("/car-brands/", RequestOptions::get())?;
        Ok(list.brands)
    }

    pub fn models(&self, brand: &str) -> Result<Vec<String>> {
        let list: ModelList = self
            .client
            .fetch("/car-models/", RequestOptions::get().query("brand", brand))?;
        Ok(list.models)
    }

    pub fn specs(&self, model: &str) -> Result<CarSpecs> {
        self.client
            .fetch("/car-specs/", RequestOptions::get().query("model", model))
    }
}

/// Display label for a model code: underscores become spaces.
pub fn model_label(model: &str) -> String {
    model.replace('_', " ")
}
