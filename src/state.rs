//! Application state.
//!
//! Everything the views render from lives in one [`AppState`]. Wizard and
//! pane positions are explicit enums rather than whatever happens to be
//! visible on the page.

use crate::config::{APARTMENT_MARKET_URL, CAR_MARKET_URL};
use crate::forms::FormData;
use crate::models::{
    Asset, AssetType, DashboardSummary, Evaluation, ListingFilters, Portfolio, UserProfile,
};
use crate::router::View;

// ---------------------------------------------------------------------------
// Wizard and pane positions
// ---------------------------------------------------------------------------

/// Add-asset wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Selection,
    Form(AssetType),
}

/// Evaluate wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluateStep {
    #[default]
    Selection,
    Form(AssetType),
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketKind {
    Apartments,
    Cars,
}

impl MarketKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "apartments" => Some(MarketKind::Apartments),
            "cars" => Some(MarketKind::Cars),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MarketKind::Apartments => "Аналитика рынка квартир",
            MarketKind::Cars => "Аналитика рынка автомобилей",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            MarketKind::Apartments => APARTMENT_MARKET_URL,
            MarketKind::Cars => CAR_MARKET_URL,
        }
    }
}

/// Market analytics pane: the chooser, or one embedded dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketPane {
    #[default]
    Selection,
    Dashboard(MarketKind),
}

/// The re-evaluation form of one asset, pre-filled from its stored details.
#[derive(Debug, Clone)]
pub struct UpdateForm {
    pub asset_id: i64,
    pub asset_type: AssetType,
    pub values: FormData,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub assets: Vec<Asset>,
    pub portfolios: Vec<Portfolio>,
    pub dashboard: DashboardSummary,
    pub view: View,
    pub selected_asset: Option<i64>,
    pub last_evaluation: Option<Evaluation>,
    pub add_wizard: WizardStep,
    pub evaluate_wizard: EvaluateStep,
    pub market: MarketPane,
    pub update_form: Option<UpdateForm>,
    pub listing_filters: ListingFilters,
    pub car_brands: Vec<String>,
    pub car_models: Vec<String>,
    pub profile: UserProfile,
}

impl AppState {
    pub fn asset(&self, id: i64) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Drop one asset from the local collection; returns whether it was there.
    pub fn remove_asset(&mut self, id: i64) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != id);
        self.assets.len() != before
    }

    /// Overwrite an asset in place, or append it when unknown.
    pub fn replace_asset(&mut self, asset: Asset) {
        match self.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(slot) => *slot = asset,
            None => self.assets.push(asset),
        }
    }

    pub fn default_portfolio_id(&self) -> Option<i64> {
        self.portfolios.first().map(|p| p.id)
    }
}
