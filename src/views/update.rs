//! Re-evaluation form of an existing asset.

use askama::Template;

use super::fields::{apartment_fields, car_fields};
use crate::format::currency;
use crate::models::{Asset, AssetType};
use crate::router::ids;
use crate::state::UpdateForm;

#[derive(Template)]
#[template(path = "update_form.html")]
struct UpdateFormTemplate<'a> {
    name: &'a str,
    value: String,
    asset_type: &'static str,
    asset_id: i64,
    fields: String,
    submit_id: &'static str,
}

pub fn render(asset: &Asset, form: &UpdateForm, brands: &[String], models: &[String]) -> String {
    let fields = match form.asset_type {
        AssetType::Car => car_fields(&form.values, brands, models),
        _ => apartment_fields(&form.values),
    };
    UpdateFormTemplate {
        name: &asset.name,
        value: currency(asset.current_value),
        asset_type: form.asset_type.as_str(),
        asset_id: asset.id,
        fields,
        submit_id: ids::UPDATE_SUBMIT,
    }
    .render()
    .unwrap_or_default()
}
