//! `/assets/` endpoints.

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::{Asset, AssetPatch, NewAsset, PriceHistory};

// ---------------------------------------------------------------------------
// AssetsApi
// ---------------------------------------------------------------------------

pub struct AssetsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AssetsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Asset>> {
        self.client.fetch_list("/assets/", RequestOptions::get())
    }

    /// All assets, or an empty list when the request fails.
    pub fn load(&self) -> Vec<Asset> {
        self.list().unwrap_or_else(|e| {
            tracing::error!("Error loading assets: {}", e);
            Vec::new()
        })
    }

    pub fn create(&self, asset: &NewAsset) -> Result<Asset> {
        self.client.fetch("/assets/", RequestOptions::post(asset)?)
    }

    pub fn update(&self, id: i64, patch: &AssetPatch) -> Result<Asset> {
        self.client
            .fetch(&format!("/assets/{}/", id), RequestOptions::patch(patch)?)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client
            .execute(&format!("/assets/{}/", id), RequestOptions::delete())?;
        Ok(())
    }

    pub fn price_history(&self, id: i64) -> Result<PriceHistory> {
        self.client.fetch(
            &format!("/assets/{}/price-history/", id),
            RequestOptions::get(),
        )
    }
}
