use askama::Template;

use crate::format::{currency, ru_date};
use crate::models::{Asset, AssetType};
use crate::router::ids;

/// One line of the parameters panel.
#[derive(Debug, PartialEq)]
pub struct ParamRow {
    pub key: String,
    pub value: String,
}

impl ParamRow {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

struct ActionButton {
    name: &'static str,
    color: &'static str,
    icon: &'static str,
    caption: &'static str,
}

static ACTIONS: [ActionButton; 3] = [
    ActionButton {
        name: "update-evaluation",
        color: "green",
        icon: "refresh-cw",
        caption: "Обновить оценку",
    },
    ActionButton {
        name: "delete-asset",
        color: "red",
        icon: "trash-2",
        caption: "Удалить актив",
    },
    ActionButton {
        name: "put-in-sales",
        color: "orange",
        icon: "tag",
        caption: "Выставить на продажу",
    },
];

#[derive(Template)]
#[template(path = "asset_detail.html")]
struct AssetDetailTemplate<'a> {
    asset_id: i64,
    color: &'static str,
    icon: &'static str,
    address: &'a str,
    name: &'a str,
    value: String,
    created: String,
    updated: String,
    chart_id: &'static str,
    show_map: bool,
    parameters: Vec<ParamRow>,
    portfolio: &'a str,
    actions: &'static [ActionButton],
}

/// Type, location and every stored detail, in order.
pub fn parameter_rows(asset: &Asset) -> Vec<ParamRow> {
    let mut rows = vec![ParamRow::new("Тип", asset.asset_type.label())];
    if let Some(address) = asset.address.as_deref().filter(|a| !a.is_empty()) {
        rows.push(ParamRow::new("Местоположение", address));
    }
    rows.extend(asset.details().iter().map(|(k, v)| ParamRow::new(k, v)));
    rows
}

/// Full detail page; the chart area is filled separately.
pub fn render(asset: &Asset) -> String {
    AssetDetailTemplate {
        asset_id: asset.id,
        color: asset.asset_type.color(),
        icon: asset.asset_type.icon(),
        address: asset.address_or_placeholder(),
        name: &asset.name,
        value: currency(asset.current_value),
        created: ru_date(asset.created_at.as_deref()),
        updated: ru_date(asset.updated_at.as_deref()),
        chart_id: ids::PRICE_HISTORY_CHART,
        show_map: asset.asset_type == AssetType::Apartment,
        parameters: parameter_rows(asset),
        portfolio: asset
            .portfolio_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Не указан"),
        actions: &ACTIONS,
    }
    .render()
    .unwrap_or_default()
}
