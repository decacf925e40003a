//! `/marketplace/` endpoints.

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::{CreateListing, ListingFilters, MarketplaceListing};

// ---------------------------------------------------------------------------
// MarketplaceApi
// ---------------------------------------------------------------------------

pub struct MarketplaceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MarketplaceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Active listings matching `filters`.
    pub fn listings(&self, filters: &ListingFilters) -> Result<Vec<MarketplaceListing>> {
        let mut options = RequestOptions::get();
        options.query = filters.to_query();
        self.client.fetch_list("/marketplace/listings/", options)
    }

    /// The signed-in user's listings, active or not.
    pub fn my_listings(&self) -> Result<Vec<MarketplaceListing>> {
        self.client
            .fetch_list("/marketplace/my-listings/", RequestOptions::get())
    }

    pub fn create(&self, listing: &CreateListing) -> Result<()> {
        self.client
            .execute("/marketplace/create/", RequestOptions::post(listing)?)?;
        Ok(())
    }

    pub fn remove(&self, listing_id: i64) -> Result<()> {
        self.client.execute(
            &format!("/marketplace/listings/{}/", listing_id),
            RequestOptions::delete(),
        )?;
        Ok(())
    }
}
