use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::decimal;

// ---------------------------------------------------------------------------
// DashboardSummary: aggregate returned by GET /dashboard/
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub total_change: f64,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub change_percent: f64,
    #[serde(default)]
    pub asset_count: i64,
    #[serde(default)]
    pub recent_assets: Vec<DashboardAsset>,
    #[serde(default)]
    pub all_assets: Vec<DashboardAsset>,
}

impl DashboardSummary {
    /// Assets to show as cards: the full list when the server sent one,
    /// otherwise the recent ones.
    pub fn card_assets(&self) -> &[DashboardAsset] {
        if !self.all_assets.is_empty() {
            &self.all_assets
        } else {
            &self.recent_assets
        }
    }
}

/// An asset as listed on the dashboard, with its 30-day change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardAsset {
    #[serde(flatten)]
    pub asset: Asset,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub change_percentage: f64,
}

impl From<Asset> for DashboardAsset {
    fn from(asset: Asset) -> Self {
        Self {
            asset,
            change_percentage: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// PriceHistory: GET /assets/{id}/price-history/
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PriceHistory {
    #[serde(default)]
    pub asset_name: String,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub current_value: f64,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub change_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PricePoint {
    #[serde(default)]
    pub date: String,
    /// Month label such as `"Mar 2025"`.
    #[serde(default)]
    pub month: String,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub value: f64,
}
