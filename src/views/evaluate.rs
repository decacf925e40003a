//! Evaluate wizard: forms and the result card.

use askama::Template;

use super::fields::{apartment_fields, car_fields};
use super::wizard::type_selection;
use crate::config::MODEL_ACCURACY;
use crate::forms::FormData;
use crate::models::{AssetType, EvaluationResult};
use crate::router::ids;

#[derive(Template)]
#[template(path = "evaluate/form.html")]
struct EvaluateFormTemplate {
    heading: &'static str,
    asset_type: &'static str,
    fields: String,
    submit_id: &'static str,
}

#[derive(Template)]
#[template(path = "evaluate/result.html")]
struct ResultTemplate {
    icon: &'static str,
    color: &'static str,
    genitive: &'static str,
    price: String,
    range: String,
    accuracy: &'static str,
}

pub fn selection() -> String {
    type_selection("select-evaluation-type", "Что вы хотите оценить?")
}

pub fn apartment_form(values: &FormData) -> String {
    EvaluateFormTemplate {
        heading: "Оценка квартиры",
        asset_type: AssetType::Apartment.as_str(),
        fields: apartment_fields(values),
        submit_id: ids::EVALUATE_SUBMIT,
    }
    .render()
    .unwrap_or_default()
}

pub fn car_form(values: &FormData, brands: &[String], models: &[String]) -> String {
    EvaluateFormTemplate {
        heading: "Оценка автомобиля",
        asset_type: AssetType::Car.as_str(),
        fields: car_fields(values, brands, models),
        submit_id: ids::EVALUATE_SUBMIT,
    }
    .render()
    .unwrap_or_default()
}

/// Result card with the price, its range and the report actions.
pub fn result(result: &EvaluationResult, asset_type: AssetType) -> String {
    ResultTemplate {
        icon: asset_type.icon(),
        color: asset_type.color(),
        genitive: asset_type.genitive(),
        price: result.price_text(),
        range: result.range_text(),
        accuracy: MODEL_ACCURACY,
    }
    .render()
    .unwrap_or_default()
}
