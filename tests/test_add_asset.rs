//! The add-asset wizard: type selection, dependent selects, pre-evaluation,
//! submission and inline portfolio creation.

mod common;

use portfolio_client::forms::FormData;
use portfolio_client::models::AssetType;
use portfolio_client::router::{ids, View};
use portfolio_client::state::WizardStep;
use portfolio_client::transport::Method;
use serde_json::json;

use common::Fixture;

fn on_form(asset_type: &str) -> Fixture {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::AddAsset);
    let args = FormData::from_pairs([("type", asset_type)]);
    assert!(fx.app.dispatch("select-asset-type", &args));
    fx
}

fn apartment_form() -> FormData {
    FormData::from_pairs([
        ("name", "Новая квартира"),
        ("portfolio_id", "10"),
        ("location", "ул. Бунёдкор, 12"),
        ("district", "Chilonzor tumani"),
        ("mahalla", "Gavhar mahallasi"),
        ("rooms", "2"),
        ("area", "54.5"),
        ("floor", "3"),
        ("total_floors", "9"),
        ("renovation", "Zo_r"),
    ])
}

fn car_form() -> FormData {
    FormData::from_pairs([
        ("name", "Моя машина"),
        ("portfolio_id", "10"),
        ("state", "Toshkent shahri"),
        ("brand", "Chevrolet"),
        ("model", "Cobalt"),
        ("year", "2021"),
        ("engine_volume", "1.5"),
        ("fuel", "Benzin"),
        ("body_type", "Sedan"),
        ("color", "Oq"),
        ("condition", "Yaxshi"),
        ("mileage", "30000"),
    ])
}

fn script_created(fx: &Fixture) {
    fx.transport.respond(
        Method::Post,
        "/assets/",
        201,
        json!({"id": 3, "asset_type": "apartment", "name": "Новая квартира", "current_value": 91000}),
    );
}

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

#[test]
fn wizard_starts_at_type_selection() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::AddAsset);

    let doc = fx.app.document();
    assert_eq!(fx.app.state().add_wizard, WizardStep::Selection);
    assert!(doc.is_visible(ids::WIZARD_STEP_1));
    assert!(!doc.is_visible(ids::WIZARD_STEP_2));
    assert!(doc.html(ids::WIZARD_STEP_1).contains(r#"data-action="select-asset-type""#));
}

#[test]
fn apartment_form_has_districts_and_locked_mahalla() {
    let fx = on_form("apartment");
    let doc = fx.app.document();

    assert_eq!(fx.app.state().add_wizard, WizardStep::Form(AssetType::Apartment));
    assert!(doc.is_visible(ids::WIZARD_STEP_2));
    assert!(doc.html(ids::WIZARD_STEP_2).contains(r#"name="area" value="75""#));

    let districts = doc.control(ids::DISTRICT_SELECT).unwrap();
    assert!(districts.option_values().contains(&"Chilonzor tumani"));
    let mahalla = doc.control(ids::MAHALLA_SELECT).unwrap();
    assert!(mahalla.disabled);
    assert_eq!(mahalla.label, "Сначала выберите район...");

    let portfolios = doc.control(ids::PORTFOLIO_SELECT).unwrap();
    assert_eq!(portfolios.value, "10");
}

#[test]
fn back_inside_wizard_returns_to_selection() {
    let mut fx = on_form("apartment");
    fx.app.back();
    assert_eq!(fx.app.state().view, View::AddAsset);
    assert_eq!(fx.app.state().add_wizard, WizardStep::Selection);

    fx.app.back();
    assert_eq!(fx.app.state().view, View::Dashboard);
}

#[test]
fn reentering_the_view_resets_the_wizard() {
    let mut fx = on_form("car");
    fx.app.navigate_to(View::Dashboard);
    fx.app.navigate_to(View::AddAsset);
    assert_eq!(fx.app.state().add_wizard, WizardStep::Selection);
}

// ---------------------------------------------------------------------------
// Dependent selects
// ---------------------------------------------------------------------------

#[test]
fn district_fills_mahalla_select() {
    let mut fx = on_form("apartment");

    fx.app.select_district("Chilonzor tumani");
    let mahalla = fx.app.document().control(ids::MAHALLA_SELECT).unwrap();
    assert!(!mahalla.disabled);
    assert_eq!(mahalla.label, "Выберите махаллю...");
    assert!(mahalla.option_values().contains(&"Gavhar mahallasi"));

    fx.app.select_district("");
    let mahalla = fx.app.document().control(ids::MAHALLA_SELECT).unwrap();
    assert!(mahalla.disabled);
    assert!(mahalla.options.is_empty());
}

#[test]
fn car_brand_model_and_specs_cascade() {
    let transport = common::MockTransport::new();
    common::script_startup(&transport);
    transport.respond(Method::Get, "/car-brands/", 200, json!({"brands": ["Chevrolet", "Kia"]}));
    transport.respond(
        Method::Get,
        "/car-models/",
        200,
        json!({"models": ["Cobalt", "Nexia_3"]}),
    );
    transport.respond(
        Method::Get,
        "/car-specs/",
        200,
        json!({"body_type": "Sedan", "engine_volume": "1.5"}),
    );
    let mut fx = common::app_with(transport);
    assert!(fx.app.init());
    fx.app.navigate_to(View::AddAsset);
    fx.app.select_asset_type(AssetType::Car);

    let doc = fx.app.document();
    assert_eq!(
        doc.control(ids::CAR_BRAND_SELECT).unwrap().option_values(),
        vec!["Chevrolet", "Kia"]
    );
    assert!(doc.control(ids::CAR_MODEL_SELECT).unwrap().disabled);

    fx.app.select_car_brand("Chevrolet");
    let request = fx.transport.last(Method::Get, "/car-models/").unwrap();
    assert_eq!(request.query_param("brand"), Some("Chevrolet"));
    let models = fx.app.document().control(ids::CAR_MODEL_SELECT).unwrap();
    assert!(!models.disabled);
    assert_eq!(models.options[1].label, "Nexia 3");
    assert_eq!(models.options[1].value, "Nexia_3");

    fx.app.select_car_model("Cobalt");
    let doc = fx.app.document();
    assert_eq!(doc.value(ids::BODY_TYPE_SELECT), "Sedan");
    assert_eq!(doc.value(ids::ENGINE_VOLUME_INPUT), "1.5");
}

#[test]
fn catalog_failure_leaves_empty_brand_list() {
    let mut fx = on_form("car");
    assert!(fx.app.state().car_brands.is_empty());
    assert!(fx
        .app
        .document()
        .control(ids::CAR_BRAND_SELECT)
        .unwrap()
        .options
        .is_empty());
}

// ---------------------------------------------------------------------------
// Evaluate first
// ---------------------------------------------------------------------------

#[test]
fn evaluate_first_prices_an_apartment() {
    let mut fx = on_form("apartment");
    fx.transport.respond(
        Method::Post,
        "/evaluate/apartment/",
        200,
        json!({"predicted_price": 91000, "price_range": [85000, 97000]}),
    );

    let result = fx.app.evaluate_first(&apartment_form()).unwrap();
    assert_eq!(result.predicted_price, 91000.0);
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Расчетная стоимость квартиры: $91,000")
    );

    let body = fx
        .transport
        .last(Method::Post, "/evaluate/apartment/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["area"], 54);
    assert_eq!(body["month"], 3);
    assert_eq!(body["year"], 2025);
    assert_eq!(body["renovation"], "Zo_r");
    assert_eq!(body["bino_turi"], "Ikkilamchi_bozor");
    assert_eq!(body["atrofda"], json!(["Maktab", "Park"]));

    let button = fx.app.document().control(ids::EVALUATE_FIRST_BTN).unwrap();
    assert!(!button.disabled);
}

#[test]
fn evaluate_first_needs_the_basic_fields() {
    let mut fx = on_form("apartment");
    let form = FormData::from_pairs([("rooms", "2"), ("floor", "3")]);

    assert!(fx.app.evaluate_first(&form).is_none());
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Пожалуйста, заполните все основные поля для оценки.")
    );
    assert!(fx.transport.calls(Method::Post, "/evaluate/apartment/").is_empty());
}

#[test]
fn evaluate_first_fills_car_value() {
    let mut fx = on_form("car");
    fx.transport.respond(
        Method::Post,
        "/evaluate-car/",
        200,
        json!({"predicted_price": 13200.5, "price_range": {"lower": 12000, "upper": 14000}}),
    );

    assert!(fx.app.evaluate_first(&car_form()).is_some());
    let alert = fx.host.last_alert().unwrap();
    assert!(alert.contains("Расчетная стоимость автомобиля: $13,201"));
    assert!(alert.contains("Диапазон цен: $12,000 - $14,000"));
    assert_eq!(fx.app.document().value(ids::CURRENT_VALUE_INPUT), "13200.5");

    let body = fx
        .transport
        .last(Method::Post, "/evaluate-car/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["owners_count"], 1);
    assert_eq!(body["transmission"], "Mexanik");
    assert_eq!(body["month"], 3);
}

#[test]
fn car_evaluation_lists_missing_fields() {
    let mut fx = on_form("car");
    let mut form = car_form();
    form.remove("color");
    form.remove("mileage");

    assert!(fx.app.evaluate_first(&form).is_none());
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Пожалуйста, заполните все обязательные поля: color, mileage")
    );
}

#[test]
fn evaluate_first_reports_server_failure() {
    let mut fx = on_form("car");
    fx.transport
        .respond(Method::Post, "/evaluate-car/", 500, json!({"error": "model offline"}));

    assert!(fx.app.evaluate_first(&car_form()).is_none());
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Произошла ошибка при оценке автомобиля. Попробуйте еще раз.")
    );
    assert_eq!(fx.app.document().value(ids::CURRENT_VALUE_INPUT), "");
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[test]
fn apartment_is_created_at_evaluated_price() {
    let mut fx = on_form("apartment");
    fx.transport.respond(
        Method::Post,
        "/evaluate/apartment/",
        200,
        json!({"predicted_price": 91000, "price_range": [85000, 97000]}),
    );
    script_created(&fx);

    assert!(fx.app.dispatch("submit-add-asset", &apartment_form()));

    let body = fx
        .transport
        .last(Method::Post, "/assets/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["asset_type"], "apartment");
    assert_eq!(body["current_value"], 91000.0);
    assert_eq!(body["address"], "ул. Бунёдкор, 12");
    assert_eq!(body["portfolio"], 10);
    assert_eq!(body["area"], 54.5);
    let details = body["description"].as_str().unwrap();
    assert!(details.contains(r#""Район":"Chilonzor tumani""#));
    assert!(details.contains(r#""Ремонт":"Отличный""#));

    assert_eq!(fx.app.state().view, View::Dashboard);
    assert_eq!(fx.transport.calls(Method::Get, "/assets/").len(), 2);
}

#[test]
fn apartment_price_falls_back_to_area() {
    let mut fx = on_form("apartment");
    script_created(&fx);
    let mut form = apartment_form();
    form.remove("mahalla");

    assert!(fx.app.submit_add_asset(&form));
    assert!(fx.transport.calls(Method::Post, "/evaluate/apartment/").is_empty());
    let body = fx
        .transport
        .last(Method::Post, "/assets/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["current_value"], 54500.0);
}

#[test]
fn failed_evaluation_also_falls_back_to_area() {
    let mut fx = on_form("apartment");
    fx.transport
        .respond(Method::Post, "/evaluate/apartment/", 500, json!({}));
    script_created(&fx);

    assert!(fx.app.submit_add_asset(&apartment_form()));
    let body = fx
        .transport
        .last(Method::Post, "/assets/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["current_value"], 54500.0);
}

#[test]
fn car_is_created_with_fixed_address() {
    let mut fx = on_form("car");
    script_created(&fx);
    let mut form = car_form();
    form.set("current_value", "13200");

    assert!(fx.app.submit_add_asset(&form));
    let body = fx
        .transport
        .last(Method::Post, "/assets/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["asset_type"], "car");
    assert_eq!(body["address"], "Автомобиль (без фиксированного адреса)");
    assert_eq!(body["current_value"], 13200.0);
    assert_eq!(body["year"], 2021);
    let details = body["description"].as_str().unwrap();
    assert!(details.contains(r#""Регион":"г. Ташкент""#));
    assert!(details.contains(r#""Объем двигателя":"1.5 л""#));
}

#[test]
fn submit_requires_name_and_portfolio() {
    let mut fx = on_form("apartment");
    let mut form = apartment_form();
    form.remove("name");

    assert!(!fx.app.submit_add_asset(&form));
    assert!(fx.host.last_alert().unwrap().contains("name"));
    assert!(fx.transport.calls(Method::Post, "/assets/").is_empty());
}

#[test]
fn create_failure_restores_the_button() {
    let mut fx = on_form("apartment");
    fx.transport
        .respond(Method::Post, "/assets/", 400, json!({"name": ["required"]}));
    let mut form = apartment_form();
    form.remove("district");

    assert!(!fx.app.submit_add_asset(&form));
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Произошла ошибка при добавлении актива. Попробуйте еще раз.")
    );
    let button = fx.app.document().control(ids::ADD_ASSET_SUBMIT).unwrap();
    assert!(!button.disabled);
    assert_eq!(fx.app.state().view, View::AddAsset);
}

// ---------------------------------------------------------------------------
// Portfolios
// ---------------------------------------------------------------------------

#[test]
fn prompt_creates_and_selects_portfolio() {
    let mut fx = on_form("apartment");
    fx.host.answer_prompt(Some("Дача"));
    fx.transport.respond(
        Method::Post,
        "/portfolios/",
        201,
        json!({"id": 11, "name": "Дача"}),
    );

    let portfolio = fx.app.create_portfolio().unwrap();
    assert_eq!(portfolio.id, 11);
    assert_eq!(fx.app.state().portfolios.len(), 2);
    assert_eq!(fx.app.document().value(ids::PORTFOLIO_SELECT), "11");

    let body = fx
        .transport
        .last(Method::Post, "/portfolios/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["description"], "Портфель: Дача");
}

#[test]
fn cancelled_prompt_creates_nothing() {
    let mut fx = on_form("apartment");
    fx.host.answer_prompt(None);
    assert!(fx.app.create_portfolio().is_none());

    fx.host.answer_prompt(Some("   "));
    assert!(fx.app.create_portfolio().is_none());
    assert!(fx.transport.calls(Method::Post, "/portfolios/").is_empty());
}
