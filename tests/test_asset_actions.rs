//! Actions on an existing asset: re-evaluation and deletion.

mod common;

use portfolio_client::forms::FormData;
use portfolio_client::models::AssetType;
use portfolio_client::router::{ids, View};
use portfolio_client::transport::Method;
use serde_json::json;

use common::Fixture;

fn updating(id: i64) -> Fixture {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::AssetDetail(id));
    let args = FormData::from_pairs([("asset-id", id.to_string())]);
    assert!(fx.app.dispatch("update-evaluation", &args));
    fx
}

// ---------------------------------------------------------------------------
// Update evaluation: pre-fill
// ---------------------------------------------------------------------------

#[test]
fn apartment_update_form_is_prefilled_from_details() {
    let fx = updating(1);
    let state = fx.app.state();
    let form = state.update_form.as_ref().unwrap();

    assert_eq!(state.view, View::UpdateEvaluation(1));
    assert_eq!(form.asset_type, AssetType::Apartment);
    assert_eq!(form.values.get("district"), Some("Chilonzor tumani"));
    assert_eq!(form.values.get("mahalla"), Some("Gavhar mahallasi"));
    assert_eq!(form.values.get("area"), Some("75"));
    assert_eq!(form.values.get("bino_turi"), Some("Ikkilamchi_bozor"));
    assert_eq!(form.values.get("qurilish_turi"), Some("Panelli"));
    assert_eq!(form.values.get("renovation"), Some("Yaxshi"));

    let doc = fx.app.document();
    assert_eq!(doc.title, "Обновить оценку: Квартира на Чиланзаре");
    assert_eq!(doc.value(ids::MAHALLA_SELECT), "Gavhar mahallasi");
    let html = doc.html(ids::UPDATE_EVALUATION_VIEW);
    assert!(html.contains("Обновить оценку актива"));
    assert!(html.contains(r#"<option value="Panelli" selected>Панельный</option>"#));
}

#[test]
fn car_update_form_resolves_labels_to_codes() {
    let fx = updating(2);
    let form = fx.app.state().update_form.as_ref().unwrap();

    assert_eq!(form.asset_type, AssetType::Car);
    assert_eq!(form.values.get("brand"), Some("Chevrolet"));
    assert_eq!(form.values.get("state"), Some("Toshkent shahri"));
    assert_eq!(form.values.get("owners_count"), Some("4"));
    assert_eq!(form.values.get("engine_volume"), Some("1.5"));
    assert_eq!(form.values.get("mileage"), Some("45000"));
}

#[test]
fn navigating_straight_to_update_prefills_too() {
    let mut fx = common::setup_app();
    assert!(fx.app.navigate_by_name("update-evaluation", Some(1)));
    assert_eq!(fx.app.state().update_form.as_ref().unwrap().asset_id, 1);
    assert!(!fx.app.document().html(ids::UPDATE_EVALUATION_VIEW).is_empty());
}

#[test]
fn back_from_update_returns_to_detail() {
    let mut fx = updating(1);
    fx.app.back();
    assert_eq!(fx.app.state().view, View::AssetDetail(1));
}

// ---------------------------------------------------------------------------
// Update evaluation: submit
// ---------------------------------------------------------------------------

fn update_form() -> FormData {
    FormData::from_pairs([
        ("district", "Chilonzor tumani"),
        ("mahalla", "Gavhar mahallasi"),
        ("rooms", "3"),
        ("area", "78"),
        ("floor", "4"),
        ("total_floors", "9"),
        ("renovation", "Zo_r"),
    ])
}

#[test]
fn update_patches_value_and_details() {
    let mut fx = updating(1);
    fx.transport.respond(
        Method::Post,
        "/evaluate/apartment/",
        200,
        json!({"predicted_price": 95000, "price_range": [90000, 100000]}),
    );
    let mut updated = common::apartment_json();
    updated["current_value"] = json!(95000);
    fx.transport.respond(Method::Patch, "/assets/1/", 200, updated);

    assert!(fx.app.dispatch("submit-update-evaluation", &update_form()));

    let body = fx
        .transport
        .last(Method::Patch, "/assets/1/")
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(body["current_value"], 95000.0);
    let details = body["description"].as_str().unwrap();
    assert!(details.contains(r#""Площадь":"78 м²""#));
    assert!(details.contains(r#""Ремонт":"Отличный""#));

    assert_eq!(fx.app.state().view, View::AssetDetail(1));
    assert!(fx.app.state().update_form.is_none());
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Оценка успешно обновлена! Новая стоимость: $95,000")
    );
    let button = fx.app.document().control(ids::UPDATE_SUBMIT).unwrap();
    assert!(!button.disabled);
}

#[test]
fn zero_price_is_not_saved() {
    let mut fx = updating(1);
    fx.transport.respond(
        Method::Post,
        "/evaluate/apartment/",
        200,
        json!({"predicted_price": 0}),
    );

    assert!(!fx.app.submit_update_evaluation(&update_form()));
    assert!(fx.transport.calls(Method::Patch, "/assets/1/").is_empty());
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Ошибка при обновлении оценки. Попробуйте снова.")
    );
    assert_eq!(fx.app.state().view, View::UpdateEvaluation(1));
}

#[test]
fn patch_failure_keeps_the_form() {
    let mut fx = updating(1);
    fx.transport.respond(
        Method::Post,
        "/evaluate/apartment/",
        200,
        json!({"predicted_price": 95000}),
    );
    fx.transport
        .respond(Method::Patch, "/assets/1/", 500, json!({"detail": "db down"}));

    assert!(!fx.app.submit_update_evaluation(&update_form()));
    assert!(fx.app.state().update_form.is_some());
    assert_eq!(fx.app.state().asset(1).unwrap().current_value, 85000.0);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_asks_first() {
    let mut fx = common::setup_app();
    fx.host.answer_confirm(false);

    assert!(!fx.app.delete_asset(1));
    assert!(fx.host.confirms()[0].contains("\"Квартира на Чиланзаре\""));
    assert!(fx.transport.calls(Method::Delete, "/assets/1/").is_empty());
}

#[test]
fn delete_removes_and_reloads() {
    let mut fx = common::setup_app();
    fx.app.navigate_to(View::AssetDetail(1));
    fx.transport.respond(Method::Delete, "/assets/1/", 204, json!(null));
    fx.transport.reset(Method::Get, "/assets/");
    fx.transport
        .respond(Method::Get, "/assets/", 200, json!([common::car_json()]));

    let args = FormData::from_pairs([("asset-id", "1")]);
    assert!(fx.app.dispatch("delete-asset", &args));

    assert_eq!(fx.transport.calls(Method::Delete, "/assets/1/").len(), 1);
    assert_eq!(fx.app.state().view, View::Dashboard);
    assert!(fx.app.state().asset(1).is_none());
    assert_eq!(fx.app.state().assets.len(), 1);
}

#[test]
fn delete_failure_alerts() {
    let mut fx = common::setup_app();
    fx.transport
        .respond(Method::Delete, "/assets/1/", 403, json!({"detail": "forbidden"}));

    assert!(!fx.app.delete_asset(1));
    assert_eq!(
        fx.host.last_alert().as_deref(),
        Some("Ошибка при удалении актива. Попробуйте снова.")
    );
    assert!(fx.app.state().asset(1).is_some());
}

#[test]
fn unknown_asset_cannot_be_deleted() {
    let mut fx = common::setup_app();
    assert!(!fx.app.delete_asset(77));
    assert!(fx.host.confirms().is_empty());
}
