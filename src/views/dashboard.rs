//! Summary cards and the asset grid.

use askama::Template;

use crate::dom::Document;
use crate::format::{absolute_change, currency, signed_percent};
use crate::models::{AssetType, DashboardAsset};
use crate::router::ids;
use crate::state::AppState;

const EMPTY_STATE: &str = r#"<div class="col-span-full text-center py-12"><div class="text-gray-400 dark:text-gray-600 mb-4"><i data-lucide="folder-open" class="w-16 h-16 mx-auto mb-4"></i><h3 class="text-lg font-semibold mb-2">Пока нет активов</h3><p class="text-sm">Добавьте свой первый актив, чтобы начать отслеживание портфеля</p></div><button data-action="navigate" data-view="add-asset" class="bg-blue-600 text-white px-6 py-3 rounded-lg hover:bg-blue-700 transition"><i data-lucide="plus" class="mr-2 h-5 w-5 inline"></i>Добавить первый актив</button></div>"#;

fn change_class(pct: f64) -> &'static str {
    if pct > 0.0 {
        "text-green-500"
    } else if pct < 0.0 {
        "text-red-500"
    } else {
        "text-gray-500"
    }
}

#[derive(Template)]
#[template(path = "asset_card.html")]
struct AssetCardTemplate<'a> {
    id: i64,
    color: &'static str,
    icon: &'static str,
    address: &'a str,
    name: &'a str,
    badge_class: &'static str,
    badge: &'static str,
    value: String,
    change_class: &'static str,
    change: String,
    percent: String,
}

/// One clickable asset card.
pub fn asset_card(item: &DashboardAsset) -> String {
    let asset = &item.asset;
    let pct = item.change_percentage;
    let badge_class = match asset.asset_type {
        AssetType::Car => "bg-green-100 text-green-800 dark:bg-green-900/50 dark:text-green-300",
        _ => "bg-blue-100 text-blue-800 dark:bg-blue-900/50 dark:text-blue-300",
    };
    AssetCardTemplate {
        id: asset.id,
        color: asset.asset_type.color(),
        icon: asset.asset_type.icon(),
        address: asset.address_or_placeholder(),
        name: &asset.name,
        badge_class,
        badge: asset.asset_type.badge(),
        value: currency(asset.current_value),
        change_class: change_class(pct),
        change: currency(absolute_change(asset.current_value, pct)),
        percent: signed_percent(pct, 1),
    }
    .render()
    .unwrap_or_default()
}

/// Fill the summary cards and the asset grid.
pub fn render(doc: &mut Document, state: &AppState) {
    let summary = &state.dashboard;
    doc.set_html(ids::TOTAL_VALUE, currency(summary.total_value));
    let class = if summary.total_change > 0.0 {
        "text-green-500"
    } else {
        "text-red-500"
    };
    let sign = if summary.total_change > 0.0 { "+" } else { "" };
    doc.set_html(
        ids::TOTAL_CHANGE,
        format!(
            r#"<span class="text-2xl font-bold {}">{}{:.1}%</span>"#,
            class, sign, summary.change_percent
        ),
    );
    doc.set_html(ids::ASSET_COUNT, summary.asset_count.to_string());

    if state.assets.is_empty() {
        doc.set_html(ids::ASSETS_GRID, EMPTY_STATE);
        return;
    }

    let cards: String = if summary.card_assets().is_empty() {
        state
            .assets
            .iter()
            .cloned()
            .map(DashboardAsset::from)
            .map(|a| asset_card(&a))
            .collect()
    } else {
        summary.card_assets().iter().map(asset_card).collect()
    };
    doc.set_html(ids::ASSETS_GRID, cards);
}
