//! Views and their page chrome.

/// Element ids shared by the router and the views.
pub mod ids {
    pub const DASHBOARD_VIEW: &str = "dashboard-view";
    pub const ASSET_DETAIL_VIEW: &str = "asset-detail-view";
    pub const ADD_ASSET_VIEW: &str = "add-asset-view";
    pub const EVALUATE_VIEW: &str = "evaluate-view";
    pub const MARKET_VIEW: &str = "market-view";
    pub const ANNOUNCEMENTS_VIEW: &str = "announcements-view";
    pub const AI_ASSISTANT_VIEW: &str = "ai-assistant-view";
    pub const UPDATE_EVALUATION_VIEW: &str = "update-evaluation-view";

    pub const TOTAL_VALUE: &str = "total-value";
    pub const TOTAL_CHANGE: &str = "total-change";
    pub const ASSET_COUNT: &str = "asset-count";
    pub const ASSETS_GRID: &str = "assets-grid";

    pub const PRICE_HISTORY_CHART: &str = "price-history-chart";

    pub const WIZARD_STEP_1: &str = "wizard-step-1";
    pub const WIZARD_STEP_2: &str = "wizard-step-2";

    pub const EVALUATE_STEP_1: &str = "evaluate-step-1";
    pub const EVALUATE_STEP_2: &str = "evaluate-step-2";
    pub const EVALUATE_RESULT: &str = "evaluate-result";

    pub const MARKET_SELECTION: &str = "market-selection";
    pub const MARKET_DASHBOARD: &str = "market-dashboard";
    pub const MARKET_DASHBOARD_TITLE: &str = "market-dashboard-title";
    pub const POWERBI_IFRAME: &str = "powerbi-iframe";

    pub const ANNOUNCEMENTS_GRID: &str = "announcements-grid";
    pub const ANNOUNCEMENTS_EMPTY: &str = "announcements-empty";
    pub const FILTER_TYPE: &str = "announcement-filter-type";
    pub const FILTER_PRICE_MIN: &str = "announcement-filter-price-min";
    pub const FILTER_PRICE_MAX: &str = "announcement-filter-price-max";

    pub const USER_NAME: &str = "user-name";
    pub const USER_PLAN: &str = "user-plan";
    pub const USER_AVATAR: &str = "user-avatar";

    pub const PORTFOLIO_SELECT: &str = "portfolio-select";
    pub const DISTRICT_SELECT: &str = "district-select";
    pub const MAHALLA_SELECT: &str = "mahalla-select";
    pub const CAR_BRAND_SELECT: &str = "car-brand-select";
    pub const CAR_MODEL_SELECT: &str = "car-model-select";
    pub const BODY_TYPE_SELECT: &str = "body-type-select";
    pub const ENGINE_VOLUME_INPUT: &str = "engine-volume-input";
    pub const CURRENT_VALUE_INPUT: &str = "current-value-input";

    pub const ADD_ASSET_SUBMIT: &str = "add-asset-submit";
    pub const EVALUATE_FIRST_BTN: &str = "evaluate-first-btn";
    pub const EVALUATE_SUBMIT: &str = "evaluate-submit";
    pub const UPDATE_SUBMIT: &str = "update-evaluation-submit";

    pub const NAV_DASHBOARD: &str = "nav-dashboard";
    pub const NAV_EVALUATE: &str = "nav-evaluate";
    pub const NAV_MARKET: &str = "nav-market";
    pub const NAV_ANNOUNCEMENTS: &str = "nav-announcements";
    pub const NAV_AI_ASSISTANT: &str = "nav-ai-assistant";
}

/// Top-level views of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    AssetDetail(i64),
    AddAsset,
    Evaluate,
    Market,
    Announcements,
    AiAssistant,
    UpdateEvaluation(i64),
}

impl View {
    /// All view containers, in page order.
    pub const CONTAINERS: [&'static str; 8] = [
        ids::DASHBOARD_VIEW,
        ids::ASSET_DETAIL_VIEW,
        ids::ADD_ASSET_VIEW,
        ids::EVALUATE_VIEW,
        ids::MARKET_VIEW,
        ids::ANNOUNCEMENTS_VIEW,
        ids::AI_ASSISTANT_VIEW,
        ids::UPDATE_EVALUATION_VIEW,
    ];

    /// Parse a view name as used in links (`"asset-detail"`, ...). Views that
    /// need an asset id return `None` without one.
    pub fn from_name(name: &str, id: Option<i64>) -> Option<Self> {
        match name {
            "dashboard" => Some(View::Dashboard),
            "asset-detail" => id.map(View::AssetDetail),
            "add-asset" => Some(View::AddAsset),
            "evaluate" => Some(View::Evaluate),
            "market" => Some(View::Market),
            "announcements" => Some(View::Announcements),
            "ai-assistant" => Some(View::AiAssistant),
            "update-evaluation" => id.map(View::UpdateEvaluation),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::AssetDetail(_) => "asset-detail",
            View::AddAsset => "add-asset",
            View::Evaluate => "evaluate",
            View::Market => "market",
            View::Announcements => "announcements",
            View::AiAssistant => "ai-assistant",
            View::UpdateEvaluation(_) => "update-evaluation",
        }
    }

    pub fn container(self) -> &'static str {
        match self {
            View::Dashboard => ids::DASHBOARD_VIEW,
            View::AssetDetail(_) => ids::ASSET_DETAIL_VIEW,
            View::AddAsset => ids::ADD_ASSET_VIEW,
            View::Evaluate => ids::EVALUATE_VIEW,
            View::Market => ids::MARKET_VIEW,
            View::Announcements => ids::ANNOUNCEMENTS_VIEW,
            View::AiAssistant => ids::AI_ASSISTANT_VIEW,
            View::UpdateEvaluation(_) => ids::UPDATE_EVALUATION_VIEW,
        }
    }

    /// Page title; asset views use the asset name when it is known.
    pub fn title(self, asset_name: Option<&str>) -> String {
        match self {
            View::Dashboard => "Мои Активы".into(),
            View::AssetDetail(_) => asset_name.unwrap_or("Детали актива").to_string(),
            View::AddAsset => "Добавление нового актива".into(),
            View::Evaluate => "Оценить актив".into(),
            View::Market => "Аналитика рынка".into(),
            View::Announcements => "Объявления".into(),
            View::AiAssistant => "AI Ассистент".into(),
            View::UpdateEvaluation(_) => {
                format!("Обновить оценку: {}", asset_name.unwrap_or(""))
            }
        }
    }

    /// Sidebar item highlighted for this view, if any.
    pub fn nav_item(self) -> Option<&'static str> {
        match self {
            View::Dashboard => Some(ids::NAV_DASHBOARD),
            View::Evaluate => Some(ids::NAV_EVALUATE),
            View::Market => Some(ids::NAV_MARKET),
            View::Announcements => Some(ids::NAV_ANNOUNCEMENTS),
            View::AiAssistant => Some(ids::NAV_AI_ASSISTANT),
            _ => None,
        }
    }

    pub fn shows_back_button(self) -> bool {
        self != View::Dashboard
    }
}
