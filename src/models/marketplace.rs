use serde::{Deserialize, Serialize};

use super::asset::{AssetDetails, AssetType};
use super::decimal;

// ---------------------------------------------------------------------------
// MarketplaceListing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MarketplaceListing {
    pub id: i64,
    pub asset: ListingAsset,
    /// Absent on the owner's own listing feed.
    #[serde(default)]
    pub seller: Seller,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub listing_price: f64,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub listed_at: Option<String>,
    /// Set by the public feed only; the own-listings feed omits it.
    #[serde(default)]
    pub is_own_listing: bool,
    /// `Some(false)` once the listing has been withdrawn.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl MarketplaceListing {
    /// Short summary under the listing title: rooms/area/floor for
    /// apartments, brand/model/year for cars.
    pub fn key_details(&self) -> String {
        let details = &self.asset.details;
        let get = |key: &str| details.get(key).unwrap_or("").trim().to_string();
        let parts: Vec<String> = match self.asset.asset_type {
            AssetType::Apartment => {
                let rooms = get("Кол-во комнат");
                let floor = get("Этаж");
                vec![
                    if rooms.is_empty() { rooms } else { format!("{}-комн.", rooms) },
                    get("Площадь"),
                    if floor.is_empty() { floor } else { format!("{} этаж", floor) },
                ]
            }
            AssetType::Car => vec![get("Марка"), get("Модель"), get("Год выпуска")],
            AssetType::Other => Vec::new(),
        };
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListingAsset {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub details: AssetDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Default for Seller {
    fn default() -> Self {
        Self {
            username: "Вы".to_string(),
            email: None,
            phone: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ListingFilters
// ---------------------------------------------------------------------------

/// Filters for `GET /marketplace/listings/`. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    pub asset_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ListingFilters {
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("asset_type", &self.asset_type),
            ("min_price", &self.min_price),
            ("max_price", &self.max_price),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Some((name.to_string(), v.to_string())),
            _ => None,
        })
        .collect()
    }
}

/// Body of `POST /marketplace/create/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateListing {
    pub asset_id: i64,
    pub listing_price: f64,
    pub description: String,
}
