//! Routing, the dashboard, asset details with the price chart and the market
//! analytics pane.

mod common;

use portfolio_client::config::CAR_MARKET_URL;
use portfolio_client::forms::FormData;
use portfolio_client::router::{ids, View};
use portfolio_client::state::{MarketKind, MarketPane};
use portfolio_client::transport::Method;
use serde_json::json;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[test]
fn init_lands_on_dashboard() {
    let fx = common::setup_app();
    let doc = fx.app.document();

    assert_eq!(fx.app.state().view, View::Dashboard);
    assert!(doc.is_visible(ids::DASHBOARD_VIEW));
    assert!(!doc.is_visible(ids::ASSET_DETAIL_VIEW));
    assert_eq!(doc.title, "Мои Активы");
    assert!(!doc.back_visible);
    assert_eq!(doc.active_nav.as_deref(), Some(ids::NAV_DASHBOARD));
}

#[test]
fn dashboard_shows_totals_and_cards() {
    let fx = common::setup_app();
    let doc = fx.app.document();

    assert_eq!(doc.html(ids::TOTAL_VALUE), "$97,500");
    assert!(doc.html(ids::TOTAL_CHANGE).contains("+1.6%"));
    assert!(doc.html(ids::TOTAL_CHANGE).contains("text-green-500"));
    assert_eq!(doc.html(ids::ASSET_COUNT), "2");

    let grid = doc.html(ids::ASSETS_GRID);
    assert!(grid.contains(r#"data-view="asset-detail" data-id="1""#));
    assert!(grid.contains("Chevrolet Cobalt"));
    assert!(grid.contains("-1.2%"));
}

#[test]
fn empty_portfolio_shows_call_to_action() {
    let transport = common::MockTransport::new();
    transport.respond(Method::Get, "/auth/profile/", 200, common::profile_json());
    transport.respond(Method::Get, "/dashboard/", 200, json!({"total_value": 0}));
    transport.respond(Method::Get, "/assets/", 200, json!([]));
    transport.respond(Method::Get, "/portfolios/", 200, json!([common::portfolio_json()]));
    let mut fx = common::app_with(transport);
    assert!(fx.app.init());

    let grid = fx.app.document().html(ids::ASSETS_GRID);
    assert!(grid.contains(r#"data-view="add-asset""#));
    assert!(fx.app.document().html(ids::TOTAL_CHANGE).contains("text-red-500"));
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[test]
fn unknown_view_name_is_ignored() {
    let mut fx = common::setup_app();

    assert!(!fx.app.navigate_by_name("settings", None));
    assert!(!fx.app.navigate_by_name("asset-detail", None));
    assert_eq!(fx.app.state().view, View::Dashboard);
    assert!(!fx.app.dispatch("no-such-action", &FormData::new()));
}

#[test]
fn exactly_one_view_is_visible() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::Evaluate);

    let visible: Vec<&str> = View::CONTAINERS
        .iter()
        .copied()
        .filter(|id| fx.app.document().is_visible(id))
        .collect();
    assert_eq!(visible, vec![ids::EVALUATE_VIEW]);
    assert_eq!(fx.app.document().title, "Оценить актив");
    assert!(fx.app.document().back_visible);
}

#[test]
fn back_from_plain_view_returns_to_dashboard() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::AiAssistant);
    fx.app.back();
    assert_eq!(fx.app.state().view, View::Dashboard);
}

// ---------------------------------------------------------------------------
// Asset detail and chart
// ---------------------------------------------------------------------------

fn script_history(transport: &common::MockTransport) {
    transport.respond(
        Method::Get,
        "/assets/1/price-history/",
        200,
        json!({
            "asset_name": "Квартира на Чиланзаре",
            "current_value": 85000,
            "change_percentage": 2.5,
            "price_history": [
                {"date": "2025-01-01", "month": "Jan 2025", "value": 82000},
                {"date": "2025-02-01", "month": "Feb 2025", "value": 83000}
            ]
        }),
    );
}

#[test]
fn asset_detail_renders_parameters_and_chart() {
    let mut fx = common::setup_app();
    script_history(&fx.transport);

    let args = FormData::from_pairs([("view", "asset-detail"), ("id", "1")]);
    assert!(fx.app.dispatch("navigate", &args));

    let doc = fx.app.document();
    assert_eq!(fx.app.state().selected_asset, Some(1));
    assert_eq!(doc.title, "Квартира на Чиланзаре");
    assert!(doc.active_nav.is_none());

    let html = doc.html(ids::ASSET_DETAIL_VIEW);
    assert!(html.contains("Вторичный рынок"));
    assert!(html.contains("Мой портфель"));
    assert!(html.contains(r#"data-action="put-in-sales" data-asset-id="1""#));
    assert!(html.contains("Расположение и инфраструктура"));

    let chart = fx.app.chart().current().unwrap();
    assert_eq!(chart.asset_id, 1);
    assert_eq!(chart.data.labels, vec!["Jan 2025", "Feb 2025", "Mar 2025"]);
    assert_eq!(chart.data.values, vec![82000.0, 83000.0, 85000.0]);
    assert!(doc.html(ids::PRICE_HISTORY_CHART).contains("+2.50% за 30 дней"));
}

#[test]
fn car_detail_has_no_map() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::AssetDetail(2));
    let html = fx.app.document().html(ids::ASSET_DETAIL_VIEW);
    assert!(!html.contains("Расположение и инфраструктура"));
    assert!(html.contains("г. Ташкент"));
}

#[test]
fn redraw_replaces_the_previous_chart() {
    let mut fx = common::setup_app();
    script_history(&fx.transport);

    fx.app.navigate_to(View::AssetDetail(1));
    fx.app.navigate_to(View::Dashboard);
    fx.app.navigate_to(View::AssetDetail(1));

    assert_eq!(fx.app.chart().draw_count(), 2);
    assert_eq!(fx.app.chart().current().unwrap().generation, 2);
}

#[test]
fn empty_history_shows_placeholder() {
    let mut fx = common::setup_app();
    fx.transport.respond(
        Method::Get,
        "/assets/2/price-history/",
        200,
        json!({"current_value": 12500, "price_history": []}),
    );

    fx.app.navigate_to(View::AssetDetail(2));
    assert!(fx.app.chart().current().is_none());
    assert!(fx
        .app
        .document()
        .html(ids::PRICE_HISTORY_CHART)
        .contains("История стоимости будет доступна"));
}

#[test]
fn history_error_shows_error_placeholder() {
    let mut fx = common::setup_app();
    script_history(&fx.transport);
    fx.app.navigate_to(View::AssetDetail(1));
    assert!(fx.app.chart().current().is_some());

    // No script for asset 2: the mock answers 404.
    fx.app.navigate_to(View::AssetDetail(2));
    assert!(fx.app.chart().current().is_none());
    assert!(fx
        .app
        .document()
        .html(ids::PRICE_HISTORY_CHART)
        .contains("Ошибка загрузки данных истории стоимости"));
}

#[test]
fn unknown_asset_renders_nothing() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::AssetDetail(404));
    assert_eq!(fx.app.document().html(ids::ASSET_DETAIL_VIEW), "");
    assert_eq!(fx.app.document().title, "Детали актива");
}

// ---------------------------------------------------------------------------
// Market analytics
// ---------------------------------------------------------------------------

#[test]
fn market_switches_between_selection_and_dashboard() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::Market);
    assert!(fx.app.document().is_visible(ids::MARKET_SELECTION));

    let args = FormData::from_pairs([("market-type", "cars")]);
    assert!(fx.app.dispatch("show-market", &args));
    let doc = fx.app.document();
    assert_eq!(fx.app.state().market, MarketPane::Dashboard(MarketKind::Cars));
    assert!(doc.is_visible(ids::MARKET_DASHBOARD));
    assert!(!doc.is_visible(ids::MARKET_SELECTION));
    assert_eq!(doc.value(ids::POWERBI_IFRAME), CAR_MARKET_URL);

    fx.app.back();
    assert_eq!(fx.app.state().view, View::Market);
    assert_eq!(fx.app.state().market, MarketPane::Selection);
    assert_eq!(fx.app.document().value(ids::POWERBI_IFRAME), "");

    fx.app.back();
    assert_eq!(fx.app.state().view, View::Dashboard);
}

#[test]
fn unknown_market_type_is_rejected() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::Market);
    let args = FormData::from_pairs([("market-type", "boats")]);
    assert!(!fx.app.dispatch("show-market", &args));
    assert_eq!(fx.app.state().market, MarketPane::Selection);
}
