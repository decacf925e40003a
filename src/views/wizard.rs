//! Add-asset wizard: type selection, then the type-specific form.

use askama::Template;

use super::fields::{apartment_fields, car_fields, number_input, portfolio_select, text_input};
use crate::forms::FormData;
use crate::models::{AssetType, Portfolio};
use crate::router::ids;

struct TypeChoice {
    value: &'static str,
    icon: &'static str,
    color: &'static str,
    label: &'static str,
}

#[derive(Template)]
#[template(path = "wizard/type_selection.html")]
struct TypeSelectionTemplate<'a> {
    action: &'a str,
    heading: &'a str,
    kinds: Vec<TypeChoice>,
}

#[derive(Template)]
#[template(path = "wizard/add_asset_form.html")]
struct AddAssetFormTemplate {
    heading: &'static str,
    asset_type: &'static str,
    name_input: String,
    location_input: Option<String>,
    portfolio: String,
    fields: String,
    value_id: &'static str,
    value_input: Option<String>,
    evaluate_id: &'static str,
    submit_id: &'static str,
}

/// Type chooser shared by the add-asset and evaluate wizards; `action` names
/// the handler the buttons trigger.
pub fn type_selection(action: &str, heading: &str) -> String {
    let kinds = [AssetType::Apartment, AssetType::Car]
        .into_iter()
        .map(|kind| TypeChoice {
            value: kind.as_str(),
            icon: kind.icon(),
            color: kind.color(),
            label: kind.label(),
        })
        .collect();
    TypeSelectionTemplate {
        action,
        heading,
        kinds,
    }
    .render()
    .unwrap_or_default()
}

pub fn selection() -> String {
    type_selection("select-asset-type", "Какой актив вы хотите добавить?")
}

/// Starting values of a fresh apartment form.
pub fn apartment_defaults() -> FormData {
    FormData::from_pairs([
        ("rooms", "3"),
        ("area", "75"),
        ("floor", "4"),
        ("total_floors", "9"),
    ])
}

pub fn apartment_form(portfolios: &[Portfolio], selected: Option<i64>, values: &FormData) -> String {
    AddAssetFormTemplate {
        heading: "Параметры квартиры",
        asset_type: AssetType::Apartment.as_str(),
        name_input: text_input("name", "Название актива", values.get("name"), true),
        location_input: Some(text_input("location", "Адрес", values.get("location"), true)),
        portfolio: portfolio_select(portfolios, selected),
        fields: apartment_fields(values),
        value_id: ids::CURRENT_VALUE_INPUT,
        value_input: None,
        evaluate_id: ids::EVALUATE_FIRST_BTN,
        submit_id: ids::ADD_ASSET_SUBMIT,
    }
    .render()
    .unwrap_or_default()
}

pub fn car_form(
    portfolios: &[Portfolio],
    selected: Option<i64>,
    brands: &[String],
    models: &[String],
    values: &FormData,
) -> String {
    AddAssetFormTemplate {
        heading: "Параметры автомобиля",
        asset_type: AssetType::Car.as_str(),
        name_input: text_input("name", "Название актива", values.get("name"), true),
        location_input: None,
        portfolio: portfolio_select(portfolios, selected),
        fields: car_fields(values, brands, models),
        value_id: ids::CURRENT_VALUE_INPUT,
        value_input: Some(number_input(
            "current_value",
            "Текущая стоимость ($)",
            values.get("current_value"),
            true,
        )),
        evaluate_id: ids::EVALUATE_FIRST_BTN,
        submit_id: ids::ADD_ASSET_SUBMIT,
    }
    .render()
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apartment_form_has_defaults_and_portfolios() {
        let portfolios = vec![Portfolio {
            id: 4,
            name: "Мой портфель".into(),
            ..Portfolio::default()
        }];
        let html = apartment_form(&portfolios, Some(4), &apartment_defaults());
        assert!(html.contains(r#"name="rooms" value="3""#));
        assert!(html.contains(r#"name="total_floors" value="9""#));
        assert!(html.contains(r#"<option value="4" selected>Мой портфель</option>"#));
        assert!(html.contains("Сначала оценить"));
    }

    #[test]
    fn selection_offers_both_types() {
        let html = selection();
        assert!(html.contains(r#"data-type="apartment""#));
        assert!(html.contains(r#"data-type="car""#));
    }
}
