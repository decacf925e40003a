//! The client application: state, page model and every user-facing handler.
//!
//! [`PortfolioApp`] owns the API client, the [`AppState`], the rendered
//! [`Document`] and the [`Host`] used for dialogs. Handlers follow one shape:
//! validate, mark the control busy, call the API, then either update state and
//! re-render or alert and restore the control. Nothing here returns an error to
//! the caller; failures are logged and surfaced through the host.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;

use crate::api::catalog::model_label;
use crate::api::ApiClient;
use crate::auth::Auth;
use crate::config::{API_BASE_URL, DEFAULT_PORTFOLIO_DESCRIPTION, DEFAULT_PORTFOLIO_NAME};
use crate::districts;
use crate::dom::{Document, SelectOption};
use crate::error::{ClientError, Result};
use crate::format::{currency, plain_number};
use crate::forms::{self, FormData, APARTMENT_REQUIRED, CAR_REQUIRED};
use crate::host::{Host, LoggingHost};
use crate::models::{
    AssetPatch, AssetType, CreateListing, Evaluation, EvaluationRequest, EvaluationResult,
    ListingFilters, MarketplaceListing, Portfolio,
};
use crate::router::{ids, View};
use crate::state::{AppState, EvaluateStep, MarketKind, MarketPane, UpdateForm, WizardStep};
use crate::storage::{FileStore, KeyValueStore};
use crate::transport::{HttpTransport, Transport};
use crate::views::{self, chart::ChartData, chart::ChartSlot};

/// Source of "today" for evaluation months and chart labels.
pub type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

const EVALUATING: &str = "Оценка...";

// ---------------------------------------------------------------------------
// PortfolioAppBuilder
// ---------------------------------------------------------------------------

/// Builder for [`PortfolioApp`].
///
/// Everything is optional: by default the app talks HTTP to
/// [`API_BASE_URL`], keeps its session in a JSON file under the platform data
/// directory and answers dialogs through [`LoggingHost`].
pub struct PortfolioAppBuilder {
    base_url: String,
    storage_dir: Option<PathBuf>,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn KeyValueStore>>,
    host: Option<Box<dyn Host>>,
    clock: Option<Clock>,
}

impl Default for PortfolioAppBuilder {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            storage_dir: None,
            timeout: Duration::from_secs(30),
            transport: None,
            store: None,
            host: None,
            clock: None,
        }
    }
}

impl PortfolioAppBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Directory of the session file. Ignored when a custom store is set.
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Per-request timeout of the HTTP transport. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn host(mut self, host: Box<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Build the app. No request is made until [`PortfolioApp::init`].
    pub fn build(self) -> Result<PortfolioApp> {
        let store: Arc<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileStore::new(self.storage_dir)?),
        };
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.timeout)?),
        };
        let auth = Auth::new(store);
        Ok(PortfolioApp {
            client: ApiClient::new(self.base_url, transport, auth),
            host: self.host.unwrap_or_else(|| Box::new(LoggingHost)),
            doc: Document::new(),
            state: AppState::default(),
            chart: ChartSlot::new(),
            clock: self
                .clock
                .unwrap_or_else(|| Box::new(|| chrono::Local::now().date_naive())),
        })
    }
}

// ---------------------------------------------------------------------------
// PortfolioApp
// ---------------------------------------------------------------------------

pub struct PortfolioApp {
    client: ApiClient,
    host: Box<dyn Host>,
    doc: Document,
    state: AppState,
    chart: ChartSlot,
    clock: Clock,
}

impl PortfolioApp {
    pub fn builder() -> PortfolioAppBuilder {
        PortfolioAppBuilder::default()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable page model, for an embedding that writes user input back
    /// into controls.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn chart(&self) -> &ChartSlot {
        &self.chart
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth(&self) -> &Auth {
        self.client.auth()
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    // -- Startup ------------------------------------------------------------

    /// Gate on authentication, show the profile, load data and open the
    /// dashboard. Returns `false` after redirecting to the login page.
    pub fn init(&mut self) -> bool {
        if !self.client.auth().require_auth(self.host.as_ref()) {
            return false;
        }

        let profile = match self.client.profile().load() {
            Some(profile) => {
                if let Err(e) = self.client.auth().cache_profile(&profile) {
                    tracing::warn!("Could not cache user profile: {}", e);
                }
                profile
            }
            None => self.client.auth().cached_profile().unwrap_or_default(),
        };
        self.state.profile = profile;
        self.render_profile();

        self.load_app_data();
        self.navigate_to(View::Dashboard);
        true
    }

    /// Fetch dashboard, assets and portfolios concurrently, replacing the
    /// collections. A failed fetch yields an empty collection. When no
    /// portfolio exists a default one is created.
    pub fn load_app_data(&mut self) {
        let client = &self.client;
        let (dashboard, assets, portfolios) = thread::scope(|s| {
            let dashboard = s.spawn(|| client.dashboard().load());
            let assets = s.spawn(|| client.assets().load());
            let portfolios = s.spawn(|| client.portfolios().load());
            (
                dashboard.join().unwrap_or_default(),
                assets.join().unwrap_or_default(),
                portfolios.join().unwrap_or_default(),
            )
        });

        self.state.dashboard = dashboard.unwrap_or_default();
        self.state.assets = assets;
        self.state.portfolios = portfolios;

        if self.state.portfolios.is_empty() {
            match self
                .client
                .portfolios()
                .create(DEFAULT_PORTFOLIO_NAME, DEFAULT_PORTFOLIO_DESCRIPTION)
            {
                Ok(portfolio) => {
                    tracing::info!(id = portfolio.id, "Created default portfolio");
                    self.state.portfolios.push(portfolio);
                }
                Err(e) => tracing::error!("Error creating default portfolio: {}", e),
            }
        }

        tracing::debug!(
            assets = self.state.assets.len(),
            portfolios = self.state.portfolios.len(),
            "Loaded app data"
        );
    }

    // -- Routing ------------------------------------------------------------

    /// Show `view`, update the page chrome and run the view's initializer.
    pub fn navigate_to(&mut self, view: View) {
        for container in View::CONTAINERS {
            self.doc.hide(container);
        }
        self.doc.show(view.container());

        self.state.view = view;
        self.state.selected_asset = match view {
            View::AssetDetail(id) | View::UpdateEvaluation(id) => Some(id),
            _ => None,
        };
        let asset_name = self
            .state
            .selected_asset
            .and_then(|id| self.state.asset(id))
            .map(|a| a.name.clone());
        self.doc.title = view.title(asset_name.as_deref());
        self.doc.back_visible = view.shows_back_button();
        self.doc.active_nav = view.nav_item().map(str::to_string);

        match view {
            View::Dashboard => self.render_dashboard(),
            View::AssetDetail(id) => self.render_asset_detail(id),
            View::AddAsset => {
                self.state.add_wizard = WizardStep::Selection;
                self.render_add_wizard();
            }
            View::Evaluate => {
                self.state.evaluate_wizard = EvaluateStep::Selection;
                self.render_evaluate_wizard();
            }
            View::Market => {
                self.state.market = MarketPane::Selection;
                views::market::render(&mut self.doc, self.state.market);
            }
            View::Announcements => self.init_marketplace(),
            View::AiAssistant => {}
            View::UpdateEvaluation(id) => self.render_update(id),
        }
    }

    /// Navigate by link name. Unknown names, and asset views without an id,
    /// are ignored.
    pub fn navigate_by_name(&mut self, name: &str, id: Option<i64>) -> bool {
        match View::from_name(name, id) {
            Some(view) => {
                self.navigate_to(view);
                true
            }
            None => {
                tracing::debug!(name, "Ignoring navigation to unknown view");
                false
            }
        }
    }

    /// Back affordance: steps back inside a wizard first, otherwise leaves
    /// for the dashboard.
    pub fn back(&mut self) {
        match self.state.view {
            View::AddAsset if self.state.add_wizard != WizardStep::Selection => {
                self.state.add_wizard = WizardStep::Selection;
                self.render_add_wizard();
            }
            View::Evaluate if self.state.evaluate_wizard != EvaluateStep::Selection => {
                self.evaluate_again();
            }
            View::Market if self.state.market != MarketPane::Selection => {
                self.show_market_selection();
            }
            View::UpdateEvaluation(id) => self.navigate_to(View::AssetDetail(id)),
            _ => self.navigate_to(View::Dashboard),
        }
    }

    // -- Dashboard and detail -----------------------------------------------

    pub fn render_dashboard(&mut self) {
        views::dashboard::render(&mut self.doc, &self.state);
    }

    fn render_asset_detail(&mut self, id: i64) {
        let Some(asset) = self.state.asset(id) else {
            tracing::warn!(id, "Asset not found");
            self.doc.set_html(ids::ASSET_DETAIL_VIEW, "");
            return;
        };
        let html = views::asset_detail::render(asset);
        self.doc.set_html(ids::ASSET_DETAIL_VIEW, html);
        self.render_price_chart(id);
    }

    /// Load the price history of `id` and draw it, or a placeholder.
    pub fn render_price_chart(&mut self, id: i64) {
        match self.client.assets().price_history(id) {
            Ok(history) if history.price_history.is_empty() => {
                self.chart.clear();
                self.doc
                    .set_html(ids::PRICE_HISTORY_CHART, views::chart::empty_html());
            }
            Ok(history) => {
                let data = ChartData::from_history(&history, self.today());
                self.doc
                    .set_html(ids::PRICE_HISTORY_CHART, views::chart::canvas_html(&data));
                self.chart.draw(id, data);
            }
            Err(e) => {
                tracing::error!(id, "Error loading price history: {}", e);
                self.chart.clear();
                self.doc
                    .set_html(ids::PRICE_HISTORY_CHART, views::chart::error_html());
            }
        }
    }

    // -- Dependent selects --------------------------------------------------

    /// Fill the locality select for `district`; an empty or unknown district
    /// disables it.
    pub fn select_district(&mut self, district: &str) {
        self.doc.set_value(ids::DISTRICT_SELECT, district);
        let localities = districts::localities(district).filter(|_| !district.is_empty());
        let control = self.doc.control_mut(ids::MAHALLA_SELECT);
        match localities {
            Some(list) => {
                control.disabled = false;
                control.set_options(
                    "Выберите махаллю...",
                    list.iter().map(|l| SelectOption::new(l.clone(), l.clone())).collect(),
                );
            }
            None => {
                control.disabled = true;
                control.set_options("Сначала выберите район...", Vec::new());
            }
        }
    }

    fn load_car_brands(&mut self) {
        self.state.car_brands = match self.client.catalog().brands() {
            Ok(brands) => brands,
            Err(e) => {
                tracing::error!("Error loading car brands: {}", e);
                Vec::new()
            }
        };
        self.state.car_models.clear();
        let options = self
            .state
            .car_brands
            .iter()
            .map(|b| SelectOption::new(b.clone(), b.clone()))
            .collect();
        self.doc
            .control_mut(ids::CAR_BRAND_SELECT)
            .set_options("Выберите марку...", options);
        let model = self.doc.control_mut(ids::CAR_MODEL_SELECT);
        model.disabled = true;
        model.set_options("Сначала выберите марку...", Vec::new());
    }

    /// Load the models of `brand` into the model select.
    pub fn select_car_brand(&mut self, brand: &str) {
        self.doc.set_value(ids::CAR_BRAND_SELECT, brand);
        if brand.is_empty() {
            self.state.car_models.clear();
            let model = self.doc.control_mut(ids::CAR_MODEL_SELECT);
            model.disabled = true;
            model.set_options("Сначала выберите марку...", Vec::new());
            return;
        }

        self.state.car_models = match self.client.catalog().models(brand) {
            Ok(models) => models,
            Err(e) => {
                tracing::error!(brand, "Error loading car models: {}", e);
                Vec::new()
            }
        };
        let options = self
            .state
            .car_models
            .iter()
            .map(|m| SelectOption::new(m.clone(), model_label(m)))
            .collect();
        let model = self.doc.control_mut(ids::CAR_MODEL_SELECT);
        model.disabled = false;
        model.set_options("Выберите модель...", options);
    }

    /// Pre-fill body type and engine volume from the catalog specs of `model`.
    pub fn select_car_model(&mut self, model: &str) {
        self.doc.set_value(ids::CAR_MODEL_SELECT, model);
        if model.is_empty() {
            return;
        }
        match self.client.catalog().specs(model) {
            Ok(specs) => {
                if let Some(body_type) = specs.body_type.filter(|b| !b.is_empty()) {
                    self.doc.set_value(ids::BODY_TYPE_SELECT, body_type);
                }
                if let Some(volume) = specs.engine_volume {
                    self.doc
                        .set_value(ids::ENGINE_VOLUME_INPUT, plain_number(volume));
                }
            }
            Err(e) => tracing::error!(model, "Error loading car specs: {}", e),
        }
    }

    fn sync_portfolio_select(&mut self, selected: Option<i64>) {
        let options = self
            .state
            .portfolios
            .iter()
            .map(|p| SelectOption::new(p.id.to_string(), p.name.clone()))
            .collect();
        let control = self.doc.control_mut(ids::PORTFOLIO_SELECT);
        control.set_options("Выберите портфель...", options);
        if let Some(id) = selected {
            control.value = id.to_string();
        }
    }

    // -- Add-asset wizard ---------------------------------------------------

    fn render_add_wizard(&mut self) {
        match self.state.add_wizard {
            WizardStep::Selection => {
                self.doc.set_html(ids::WIZARD_STEP_1, views::wizard::selection());
                self.doc.show(ids::WIZARD_STEP_1);
                self.doc.hide(ids::WIZARD_STEP_2);
            }
            WizardStep::Form(asset_type) => {
                let selected = self.state.default_portfolio_id();
                let html = match asset_type {
                    AssetType::Car => views::wizard::car_form(
                        &self.state.portfolios,
                        selected,
                        &self.state.car_brands,
                        &self.state.car_models,
                        &FormData::new(),
                    ),
                    _ => views::wizard::apartment_form(
                        &self.state.portfolios,
                        selected,
                        &views::wizard::apartment_defaults(),
                    ),
                };
                self.doc.set_html(ids::WIZARD_STEP_2, html);
                self.doc.hide(ids::WIZARD_STEP_1);
                self.doc.show(ids::WIZARD_STEP_2);
                self.sync_portfolio_select(selected);
                if asset_type != AssetType::Car {
                    self.reset_district_selects();
                }
            }
        }
    }

    fn reset_district_selects(&mut self) {
        let options = districts::names()
            .map(|d| SelectOption::new(d, d))
            .collect();
        self.doc
            .control_mut(ids::DISTRICT_SELECT)
            .set_options("Выберите район...", options);
        self.select_district("");
    }

    /// Move the add-asset wizard to the form for `asset_type`.
    pub fn select_asset_type(&mut self, asset_type: AssetType) {
        if asset_type == AssetType::Car {
            self.load_car_brands();
        }
        self.state.add_wizard = WizardStep::Form(asset_type);
        self.render_add_wizard();
    }

    fn wizard_type(&self) -> Option<AssetType> {
        match self.state.add_wizard {
            WizardStep::Form(t) => Some(t),
            WizardStep::Selection => None,
        }
    }

    /// "Evaluate first" on the add-asset form: price the candidate and
    /// report it. For cars the price also fills the value input.
    pub fn evaluate_first(&mut self, form: &FormData) -> Option<EvaluationResult> {
        let asset_type = self.wizard_type()?;
        let today = self.today();

        let request = match asset_type {
            AssetType::Car => {
                let missing = form.missing(CAR_REQUIRED);
                if !missing.is_empty() {
                    self.host.alert(&format!(
                        "Пожалуйста, заполните все обязательные поля: {}",
                        missing.join(", ")
                    ));
                    return None;
                }
                EvaluationRequest::Car(forms::car_evaluation(form, today))
            }
            _ => {
                if !form.missing(&["area", "rooms", "floor", "total_floors"]).is_empty() {
                    self.host
                        .alert("Пожалуйста, заполните все основные поля для оценки.");
                    return None;
                }
                EvaluationRequest::Apartment(forms::apartment_evaluation(form, today))
            }
        };

        let label = self.doc.begin_busy(ids::EVALUATE_FIRST_BTN, EVALUATING);
        let outcome = self.client.evaluation().evaluate(&request);
        self.doc.end_busy(ids::EVALUATE_FIRST_BTN, label);

        match outcome {
            Ok(result) if result.predicted_price > 0.0 => {
                match asset_type {
                    AssetType::Car => {
                        self.host.alert(&format!(
                            "Расчетная стоимость автомобиля: {}\nДиапазон цен: {}",
                            result.price_text(),
                            result.range_text()
                        ));
                        self.doc.set_value(
                            ids::CURRENT_VALUE_INPUT,
                            plain_number(result.predicted_price),
                        );
                    }
                    _ => self.host.alert(&format!(
                        "Расчетная стоимость квартиры: {}",
                        currency(result.predicted_price)
                    )),
                }
                Some(result)
            }
            Ok(_) => {
                self.host
                    .alert("Не удалось выполнить оценку. Проверьте введенные данные.");
                None
            }
            Err(e) => {
                tracing::error!("Error evaluating {}: {}", asset_type.as_str(), e);
                self.host.alert(&format!(
                    "Произошла ошибка при оценке {}. Попробуйте еще раз.",
                    asset_type.genitive()
                ));
                None
            }
        }
    }

    /// Create the asset described by the add-asset form.
    ///
    /// Apartments with a location are priced by the model first; without one,
    /// or if pricing fails, the value falls back to `area * 1000`.
    pub fn submit_add_asset(&mut self, form: &FormData) -> bool {
        let Some(asset_type) = self.wizard_type() else {
            tracing::warn!("Add-asset submitted without a type");
            return false;
        };

        let mut required = vec!["name", "portfolio_id"];
        match asset_type {
            AssetType::Car => {
                required.extend_from_slice(CAR_REQUIRED);
                required.push("current_value");
            }
            _ => required.push("location"),
        }
        let missing = form.missing(&required);
        let portfolio = form.int("portfolio_id");
        if !missing.is_empty() || portfolio.is_none() {
            self.host.alert(&format!(
                "Пожалуйста, заполните все обязательные поля: {}",
                missing.join(", ")
            ));
            return false;
        }
        let portfolio = portfolio.unwrap_or_default();

        let label = self.doc.begin_busy(ids::ADD_ASSET_SUBMIT, "Добавление...");
        let body = match asset_type {
            AssetType::Car => forms::new_car(form, portfolio),
            _ => {
                let value = self
                    .price_apartment(form)
                    .unwrap_or_else(|| form.float("area").unwrap_or(0.0) * 1000.0);
                forms::new_apartment(form, portfolio, value)
            }
        };

        let outcome = self.client.assets().create(&body);
        self.doc.end_busy(ids::ADD_ASSET_SUBMIT, label);

        match outcome {
            Ok(asset) => {
                tracing::info!(id = asset.id, "Asset added");
                self.state.replace_asset(asset);
                self.load_app_data();
                self.navigate_to(View::Dashboard);
                true
            }
            Err(e) => {
                tracing::error!("Error adding asset: {}", e);
                self.host
                    .alert("Произошла ошибка при добавлении актива. Попробуйте еще раз.");
                false
            }
        }
    }

    fn price_apartment(&self, form: &FormData) -> Option<f64> {
        if !forms::can_evaluate_apartment(form) {
            return None;
        }
        let request = EvaluationRequest::Apartment(forms::apartment_evaluation(form, self.today()));
        match self.client.evaluation().evaluate(&request) {
            Ok(result) if result.predicted_price > 0.0 => Some(result.predicted_price),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Evaluation failed, using fallback value: {}", e);
                None
            }
        }
    }

    /// Prompt for a name and create a portfolio, selecting it in the form.
    pub fn create_portfolio(&mut self) -> Option<Portfolio> {
        let name = self.host.prompt("Введите название портфеля:")?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        match self
            .client
            .portfolios()
            .create(name, &format!("Портфель: {}", name))
        {
            Ok(portfolio) => {
                self.state.portfolios.push(portfolio.clone());
                self.sync_portfolio_select(Some(portfolio.id));
                Some(portfolio)
            }
            Err(e) => {
                tracing::error!("Error creating portfolio: {}", e);
                self.host
                    .alert("Не удалось создать портфель. Попробуйте еще раз.");
                None
            }
        }
    }

    // -- Evaluate wizard ----------------------------------------------------

    fn render_evaluate_wizard(&mut self) {
        let step = self.state.evaluate_wizard;
        self.doc
            .set_visible(ids::EVALUATE_STEP_1, step == EvaluateStep::Selection);
        self.doc
            .set_visible(ids::EVALUATE_STEP_2, matches!(step, EvaluateStep::Form(_)));
        self.doc
            .set_visible(ids::EVALUATE_RESULT, step == EvaluateStep::Result);

        match step {
            EvaluateStep::Selection => {
                self.doc.set_html(ids::EVALUATE_STEP_1, views::evaluate::selection());
            }
            EvaluateStep::Form(AssetType::Car) => {
                let html = views::evaluate::car_form(
                    &FormData::new(),
                    &self.state.car_brands,
                    &self.state.car_models,
                );
                self.doc.set_html(ids::EVALUATE_STEP_2, html);
            }
            EvaluateStep::Form(_) => {
                self.doc
                    .set_html(ids::EVALUATE_STEP_2, views::evaluate::apartment_form(&FormData::new()));
                self.reset_district_selects();
            }
            EvaluateStep::Result => {
                let html = self
                    .state
                    .last_evaluation
                    .as_ref()
                    .map(|ev| views::evaluate::result(&ev.result, ev.request.asset_type()))
                    .unwrap_or_default();
                self.doc.set_html(ids::EVALUATE_RESULT, html);
            }
        }
    }

    pub fn select_evaluation_type(&mut self, asset_type: AssetType) {
        if asset_type == AssetType::Car {
            self.load_car_brands();
        }
        self.state.evaluate_wizard = EvaluateStep::Form(asset_type);
        self.render_evaluate_wizard();
    }

    /// Price the evaluate form and show the result card.
    pub fn submit_evaluation(&mut self, form: &FormData) -> Option<EvaluationResult> {
        let EvaluateStep::Form(asset_type) = self.state.evaluate_wizard else {
            return None;
        };
        let required = match asset_type {
            AssetType::Car => CAR_REQUIRED,
            _ => APARTMENT_REQUIRED,
        };
        let missing = form.missing(required);
        if !missing.is_empty() {
            self.host.alert(&format!(
                "Пожалуйста, заполните все обязательные поля: {}",
                missing.join(", ")
            ));
            return None;
        }

        let request = match asset_type {
            AssetType::Car => EvaluationRequest::Car(forms::car_evaluation(form, self.today())),
            _ => EvaluationRequest::Apartment(forms::apartment_evaluation(form, self.today())),
        };

        let label = self.doc.begin_busy(ids::EVALUATE_SUBMIT, EVALUATING);
        let outcome = self.client.evaluation().evaluate(&request);
        self.doc.end_busy(ids::EVALUATE_SUBMIT, label);

        match outcome {
            Ok(result) => {
                self.state.last_evaluation = Some(Evaluation {
                    request,
                    result: result.clone(),
                });
                self.state.evaluate_wizard = EvaluateStep::Result;
                self.render_evaluate_wizard();
                Some(result)
            }
            Err(e) => {
                tracing::error!("Error evaluating {}: {}", asset_type.as_str(), e);
                self.host
                    .alert("Произошла ошибка при оценке. Попробуйте еще раз.");
                None
            }
        }
    }

    /// Download the PDF report of the last evaluation through the host.
    pub fn download_report(&mut self) -> bool {
        let Some(evaluation) = self.state.last_evaluation.as_ref() else {
            self.host.alert("Нет данных для скачивания отчета");
            return false;
        };
        match self.client.reports().download(evaluation) {
            Ok(bytes) => {
                self.host.save_file(&evaluation.report_file_name(), &bytes);
                true
            }
            Err(e) => {
                tracing::error!("Error downloading report: {}", e);
                self.host.alert("Произошла ошибка при скачивании отчета");
                false
            }
        }
    }

    pub fn evaluate_again(&mut self) {
        self.state.evaluate_wizard = EvaluateStep::Selection;
        self.render_evaluate_wizard();
    }

    // -- Asset actions ------------------------------------------------------

    /// Confirm, delete, reload and return to the dashboard.
    pub fn delete_asset(&mut self, id: i64) -> bool {
        let Some(asset) = self.state.asset(id) else {
            return false;
        };
        let question = format!(
            "Вы действительно хотите удалить актив \"{}\"?\n\nЭто действие нельзя отменить.",
            asset.name
        );
        if !self.host.confirm(&question) {
            return false;
        }

        match self.client.assets().delete(id) {
            Ok(()) => {
                self.state.remove_asset(id);
                tracing::info!(id, "Asset deleted");
                self.load_app_data();
                self.navigate_to(View::Dashboard);
                true
            }
            Err(e) => {
                tracing::error!(id, "Error deleting asset: {}", e);
                self.host
                    .alert("Ошибка при удалении актива. Попробуйте снова.");
                false
            }
        }
    }

    /// Open the re-evaluation form of `id`, pre-filled from its details.
    pub fn start_update_evaluation(&mut self, id: i64) {
        let Some(asset) = self.state.asset(id) else {
            return;
        };
        let values = match asset.asset_type {
            AssetType::Car => forms::prefill_car(asset),
            _ => forms::prefill_apartment(asset),
        };
        self.state.update_form = Some(UpdateForm {
            asset_id: id,
            asset_type: asset.asset_type,
            values,
        });
        self.navigate_to(View::UpdateEvaluation(id));
    }

    fn render_update(&mut self, id: i64) {
        let stale = self
            .state
            .update_form
            .as_ref()
            .map_or(true, |f| f.asset_id != id);
        if stale {
            if self.state.asset(id).is_some() {
                self.start_update_evaluation(id);
            } else {
                self.doc.set_html(ids::UPDATE_EVALUATION_VIEW, "");
            }
            return;
        }
        let Some(form) = self.state.update_form.clone() else {
            return;
        };
        let Some(asset) = self.state.asset(id).cloned() else {
            return;
        };

        if form.asset_type == AssetType::Car {
            self.load_car_brands();
            if let Some(brand) = form.values.get("brand") {
                self.select_car_brand(brand);
            }
            if let Some(model) = form.values.get("model") {
                self.doc.set_value(ids::CAR_MODEL_SELECT, model);
            }
        } else {
            self.reset_district_selects();
            if let Some(district) = form.values.get("district") {
                self.select_district(district);
            }
            if let Some(mahalla) = form.values.get("mahalla") {
                self.doc.set_value(ids::MAHALLA_SELECT, mahalla);
            }
        }

        let html = views::update::render(
            &asset,
            &form,
            &self.state.car_brands,
            &self.state.car_models,
        );
        self.doc.set_html(ids::UPDATE_EVALUATION_VIEW, html);
    }

    /// Re-evaluate the asset being updated, patch it, reload and show it.
    pub fn submit_update_evaluation(&mut self, form: &FormData) -> bool {
        let Some(update) = self.state.update_form.clone() else {
            return false;
        };
        let id = update.asset_id;
        let required = match update.asset_type {
            AssetType::Car => CAR_REQUIRED,
            _ => APARTMENT_REQUIRED,
        };
        let missing = form.missing(required);
        if !missing.is_empty() {
            self.host.alert(&format!(
                "Пожалуйста, заполните все обязательные поля: {}",
                missing.join(", ")
            ));
            return false;
        }

        let (request, details) = match update.asset_type {
            AssetType::Car => (
                EvaluationRequest::Car(forms::car_evaluation(form, self.today())),
                forms::car_details(form),
            ),
            _ => (
                EvaluationRequest::Apartment(forms::apartment_evaluation(form, self.today())),
                forms::apartment_details(form),
            ),
        };

        let label = self.doc.begin_busy(ids::UPDATE_SUBMIT, "Обновляем...");
        let outcome = self
            .client
            .evaluation()
            .evaluate(&request)
            .and_then(|result| {
                if result.predicted_price <= 0.0 {
                    return Err(ClientError::InvalidArgument(
                        "evaluation returned no price".into(),
                    ));
                }
                let patch = AssetPatch {
                    current_value: result.predicted_price,
                    description: details.to_json(),
                };
                let updated = self.client.assets().update(id, &patch)?;
                Ok((result, updated))
            });
        self.doc.end_busy(ids::UPDATE_SUBMIT, label);

        match outcome {
            Ok((result, updated)) => {
                self.state.replace_asset(updated);
                self.state.update_form = None;
                self.load_app_data();
                self.navigate_to(View::AssetDetail(id));
                self.host.alert(&format!(
                    "Оценка успешно обновлена! Новая стоимость: {}",
                    currency(result.predicted_price)
                ));
                true
            }
            Err(e) => {
                tracing::error!(id, "Error updating evaluation: {}", e);
                self.host
                    .alert("Ошибка при обновлении оценки. Попробуйте снова.");
                false
            }
        }
    }

    // -- Marketplace --------------------------------------------------------

    /// List asset `id` on the marketplace at its current value.
    pub fn put_in_sales(&mut self, id: i64) -> bool {
        let Some(asset) = self.state.asset(id).cloned() else {
            return false;
        };
        if !self.client.auth().is_authenticated() {
            self.host
                .alert("Необходимо войти в систему для выставления активов на продажу");
            return false;
        }
        let question = format!("Вы уверены, что хотите выставить \"{}\" на продажу?", asset.name);
        if !self.host.confirm(&question) {
            return false;
        }

        let listing = CreateListing {
            asset_id: asset.id,
            listing_price: asset.current_value,
            description: format!("{} - {}", asset.name, asset.address.as_deref().unwrap_or("")),
        };
        match self.client.marketplace().create(&listing) {
            Ok(()) => {
                self.host.alert(
                    "Актив успешно выставлен на продажу! Теперь он доступен в разделе \"Объявления\".",
                );
                self.load_app_data();
                self.navigate_to(View::Announcements);
                true
            }
            Err(e) if e.status() == Some(401) => {
                tracing::warn!("Marketplace session rejected; logging out");
                self.host
                    .alert("Сессия истекла. Пожалуйста, войдите в систему заново.");
                self.logout();
                false
            }
            Err(e) => {
                tracing::error!(id, "Error putting asset in sales: {}", e);
                let message = e
                    .server_message()
                    .unwrap_or("Ошибка при выставлении актива на продажу");
                self.host.alert(message);
                false
            }
        }
    }

    fn init_marketplace(&mut self) {
        if !self.client.auth().is_authenticated() {
            self.show_marketplace_error("Необходимо войти в систему для просмотра объявлений");
            return;
        }
        let filters = self.current_listing_filters();
        self.load_marketplace_listings(filters);
    }

    fn show_marketplace_error(&mut self, message: &str) {
        self.doc
            .set_html(ids::ANNOUNCEMENTS_GRID, views::marketplace::error_state(message));
        self.doc.hide(ids::ANNOUNCEMENTS_EMPTY);
    }

    fn show_listings(&mut self, listings: &[MarketplaceListing]) {
        if listings.is_empty() {
            self.doc.set_html(ids::ANNOUNCEMENTS_GRID, "");
            self.doc.show(ids::ANNOUNCEMENTS_EMPTY);
        } else {
            self.doc.hide(ids::ANNOUNCEMENTS_EMPTY);
            self.doc
                .set_html(ids::ANNOUNCEMENTS_GRID, views::marketplace::cards(listings));
        }
    }

    /// Filters as currently entered in the announcement filter controls.
    pub fn current_listing_filters(&self) -> ListingFilters {
        let value = |id: &str| {
            let v = self.doc.value(id).trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        ListingFilters {
            asset_type: value(ids::FILTER_TYPE),
            min_price: value(ids::FILTER_PRICE_MIN),
            max_price: value(ids::FILTER_PRICE_MAX),
        }
    }

    pub fn load_marketplace_listings(&mut self, filters: ListingFilters) -> Vec<MarketplaceListing> {
        let outcome = self.client.marketplace().listings(&filters);
        self.state.listing_filters = filters;
        match outcome {
            Ok(listings) => {
                self.show_listings(&listings);
                listings
            }
            Err(e) => {
                tracing::error!("Error loading marketplace listings: {}", e);
                self.show_marketplace_error("Ошибка при загрузке объявлений");
                Vec::new()
            }
        }
    }

    pub fn apply_listing_filters(&mut self) -> Vec<MarketplaceListing> {
        let filters = self.current_listing_filters();
        self.load_marketplace_listings(filters)
    }

    /// The signed-in user's own listings, shown in the announcements grid.
    pub fn my_listings(&mut self) -> Vec<MarketplaceListing> {
        match self.client.marketplace().my_listings() {
            Ok(mut listings) => {
                // The server does not flag its own listings here.
                for listing in &mut listings {
                    listing.is_own_listing = true;
                }
                self.show_listings(&listings);
                listings
            }
            Err(e) => {
                tracing::error!("Error loading own listings: {}", e);
                self.show_marketplace_error("Ошибка при загрузке объявлений");
                Vec::new()
            }
        }
    }

    /// Confirm and withdraw listing `id`, then reload with the same filters.
    pub fn remove_listing(&mut self, id: i64) -> bool {
        if !self
            .host
            .confirm("Вы уверены, что хотите снять объявление с продажи?")
        {
            return false;
        }
        match self.client.marketplace().remove(id) {
            Ok(()) => {
                self.host.alert("Объявление успешно снято с продажи");
                let filters = self.current_listing_filters();
                self.load_marketplace_listings(filters);
                true
            }
            Err(e) => {
                tracing::error!(id, "Error removing marketplace listing: {}", e);
                let message = e.server_message().unwrap_or("Ошибка при снятии объявления");
                self.host.alert(message);
                false
            }
        }
    }

    // -- Market analytics ---------------------------------------------------

    pub fn show_market_dashboard(&mut self, kind: MarketKind) {
        self.state.market = MarketPane::Dashboard(kind);
        views::market::render(&mut self.doc, self.state.market);
    }

    pub fn show_market_selection(&mut self) {
        self.state.market = MarketPane::Selection;
        views::market::render(&mut self.doc, self.state.market);
    }

    // -- Session ------------------------------------------------------------

    pub fn render_profile(&mut self) {
        views::profile::render(&mut self.doc, &self.state.profile);
    }

    pub fn logout(&mut self) {
        self.client.auth().logout(self.host.as_ref());
    }

    // -- Dispatch -----------------------------------------------------------

    /// Run the handler named by a `data-action` attribute.
    ///
    /// `data` carries the element's `data-*` arguments (`view`, `id`,
    /// `type`, `asset-id`, `listing-id`, `market-type`, ...) together with
    /// the fields of the enclosing form. Returns `false` for an unknown
    /// action or missing argument.
    pub fn dispatch(&mut self, action: &str, data: &FormData) -> bool {
        let asset_type = || data.get("type").and_then(AssetType::parse);
        match action {
            "navigate" => match data.get("view") {
                Some(view) => self.navigate_by_name(view, data.int("id")),
                None => false,
            },
            "back" => {
                self.back();
                true
            }
            "select-asset-type" => match asset_type() {
                Some(t) => {
                    self.select_asset_type(t);
                    true
                }
                None => false,
            },
            "select-evaluation-type" => match asset_type() {
                Some(t) => {
                    self.select_evaluation_type(t);
                    true
                }
                None => false,
            },
            "select-district" => {
                self.select_district(data.get_or("district", ""));
                true
            }
            "select-car-brand" => {
                self.select_car_brand(data.get_or("brand", ""));
                true
            }
            "select-car-model" => {
                self.select_car_model(data.get_or("model", ""));
                true
            }
            "evaluate-first" => self.evaluate_first(data).is_some(),
            "submit-add-asset" => self.submit_add_asset(data),
            "create-portfolio" => self.create_portfolio().is_some(),
            "submit-evaluation" => self.submit_evaluation(data).is_some(),
            "download-report" => self.download_report(),
            "evaluate-again" => {
                self.evaluate_again();
                true
            }
            "update-evaluation" => match data.int("asset-id") {
                Some(id) => {
                    self.start_update_evaluation(id);
                    true
                }
                None => false,
            },
            "submit-update-evaluation" => self.submit_update_evaluation(data),
            "delete-asset" => data.int("asset-id").is_some_and(|id| self.delete_asset(id)),
            "put-in-sales" => data.int("asset-id").is_some_and(|id| self.put_in_sales(id)),
            "load-listings" | "apply-listing-filters" => {
                self.apply_listing_filters();
                true
            }
            "my-listings" => {
                self.my_listings();
                true
            }
            "remove-listing" => data
                .int("listing-id")
                .is_some_and(|id| self.remove_listing(id)),
            "show-market" => match data.get("market-type").and_then(MarketKind::parse) {
                Some(kind) => {
                    self.show_market_dashboard(kind);
                    true
                }
                None => false,
            },
            "show-market-selection" => {
                self.show_market_selection();
                true
            }
            "logout" => {
                self.logout();
                true
            }
            _ => {
                tracing::debug!(action, "Unknown action");
                false
            }
        }
    }
}
