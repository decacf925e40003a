//! Form widgets shared by the add, evaluate and update forms.
//!
//! Coded selects and checkbox groups are generated from the field registry,
//! so the options a form offers are exactly the codes pre-population can
//! map back to.

use askama::Template;

use crate::api::catalog::model_label;
use crate::districts;
use crate::forms::FormData;
use crate::models::Portfolio;
use crate::registry::{self, Field};
use crate::router::ids;

/// One entry of a select or checkbox group.
struct Choice {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "fields/input.html")]
struct InputTemplate<'a> {
    name: &'a str,
    caption: &'a str,
    value: &'a str,
    numeric: bool,
    required: bool,
}

#[derive(Template)]
#[template(path = "fields/select.html")]
struct SelectTemplate<'a> {
    name: &'a str,
    id: Option<&'a str>,
    caption: &'a str,
    placeholder: &'a str,
    options: Vec<Choice>,
    disabled: bool,
}

#[derive(Template)]
#[template(path = "fields/checkboxes.html")]
struct CheckboxesTemplate<'a> {
    name: &'a str,
    caption: &'a str,
    options: Vec<Choice>,
}

pub fn text_input(name: &str, caption: &str, value: Option<&str>, required: bool) -> String {
    InputTemplate {
        name,
        caption,
        value: value.unwrap_or(""),
        numeric: false,
        required,
    }
    .render()
    .unwrap_or_default()
}

pub fn number_input(name: &str, caption: &str, value: Option<&str>, required: bool) -> String {
    InputTemplate {
        name,
        caption,
        value: value.unwrap_or(""),
        numeric: true,
        required,
    }
    .render()
    .unwrap_or_default()
}

/// A `<select>` with a placeholder option first.
pub fn select(
    name: &str,
    id: Option<&str>,
    caption: &str,
    placeholder: &str,
    options: &[(String, String)],
    selected: Option<&str>,
    disabled: bool,
) -> String {
    let options = options
        .iter()
        .map(|(value, label)| Choice {
            value: value.clone(),
            label: label.clone(),
            selected: selected == Some(value.as_str()),
        })
        .collect();
    SelectTemplate {
        name,
        id,
        caption,
        placeholder,
        options,
        disabled,
    }
    .render()
    .unwrap_or_default()
}

/// Select for a registry field; the stored value, else the field default,
/// is preselected.
pub fn coded_select(field: &Field, caption: &str, values: &FormData) -> String {
    let selected = values
        .get(field.name)
        .map(|v| field.resolve(v))
        .or_else(|| field.default_code().map(str::to_string));
    let options: Vec<(String, String)> = field
        .choices
        .iter()
        .map(|c| (c.code.to_string(), c.label.to_string()))
        .collect();
    select(
        field.name,
        None,
        caption,
        "Выберите...",
        &options,
        selected.as_deref(),
        false,
    )
}

/// Checkbox group for a multi-valued registry field.
pub fn checkbox_group(field: &Field, caption: &str, values: &FormData) -> String {
    let mut checked = values.get_all(field.name);
    if checked.is_empty() {
        checked = field.defaults.iter().map(|s| s.to_string()).collect();
    }
    let options = field
        .choices
        .iter()
        .map(|choice| Choice {
            value: choice.code.to_string(),
            label: choice.label.to_string(),
            selected: checked.iter().any(|c| c == choice.code),
        })
        .collect();
    CheckboxesTemplate {
        name: field.name,
        caption,
        options,
    }
    .render()
    .unwrap_or_default()
}

/// Portfolio select with the "create new" affordance.
pub fn portfolio_select(portfolios: &[Portfolio], selected: Option<i64>) -> String {
    let options: Vec<(String, String)> = portfolios
        .iter()
        .map(|p| (p.id.to_string(), p.name.clone()))
        .collect();
    let selected = selected.map(|id| id.to_string());
    format!(
        r#"{}<button type="button" data-action="create-portfolio" class="mt-2 text-sm text-blue-600 hover:text-blue-700">+ Создать новый портфель</button>"#,
        select(
            "portfolio_id",
            Some(ids::PORTFOLIO_SELECT),
            "Портфель",
            "Выберите портфель...",
            &options,
            selected.as_deref(),
            false,
        )
    )
}

// ---------------------------------------------------------------------------
// Type-specific blocks
// ---------------------------------------------------------------------------

/// District/locality selects plus the apartment parameters.
pub fn apartment_fields(values: &FormData) -> String {
    let district = values.get("district");
    let district_options: Vec<(String, String)> = districts::names()
        .map(|d| (d.to_string(), d.to_string()))
        .collect();
    let localities: Vec<(String, String)> = district
        .and_then(districts::localities)
        .map(|ls| ls.iter().map(|l| (l.clone(), l.clone())).collect())
        .unwrap_or_default();
    let mahalla_placeholder = if district.is_some() {
        "Выберите махаллю..."
    } else {
        "Сначала выберите район..."
    };

    let mut html = String::new();
    html.push_str(r#"<div class="grid grid-cols-2 gap-4">"#);
    html.push_str(&number_input("rooms", "Кол-во комнат", values.get("rooms"), true));
    html.push_str(&number_input("area", "Площадь (м²)", values.get("area"), true));
    html.push_str(&number_input("floor", "Этаж", values.get("floor"), true));
    html.push_str(&number_input("total_floors", "Всего этажей", values.get("total_floors"), true));
    html.push_str("</div>");

    html.push_str(r#"<div class="grid grid-cols-2 gap-4">"#);
    html.push_str(&select(
        "district",
        Some(ids::DISTRICT_SELECT),
        "Район *",
        "Выберите район...",
        &district_options,
        district,
        false,
    ));
    html.push_str(&select(
        "mahalla",
        Some(ids::MAHALLA_SELECT),
        "Махалля *",
        mahalla_placeholder,
        &localities,
        values.get("mahalla"),
        district.is_none(),
    ));
    html.push_str("</div>");

    html.push_str(r#"<div class="grid grid-cols-2 gap-4">"#);
    for field in registry::APARTMENT_FIELDS.iter().filter(|f| !f.multiple) {
        html.push_str(&coded_select(field, field.detail_key, values));
    }
    html.push_str("</div>");
    html.push_str(&checkbox_group(&registry::UYDA, registry::UYDA.detail_key, values));
    html.push_str(&checkbox_group(&registry::ATROFDA, registry::ATROFDA.detail_key, values));
    html
}

/// Brand/model selects plus the car parameters.
pub fn car_fields(values: &FormData, brands: &[String], models: &[String]) -> String {
    let brand = values.get("brand");
    let brand_options: Vec<(String, String)> =
        brands.iter().map(|b| (b.clone(), b.clone())).collect();
    let model_options: Vec<(String, String)> =
        models.iter().map(|m| (m.clone(), model_label(m))).collect();
    let model_placeholder = if brand.is_some() {
        "Выберите модель..."
    } else {
        "Сначала выберите марку..."
    };

    let mut html = String::new();
    html.push_str(&coded_select(&registry::STATE, registry::STATE.detail_key, values));
    html.push_str(r#"<div class="grid grid-cols-2 gap-4">"#);
    html.push_str(&select(
        "brand",
        Some(ids::CAR_BRAND_SELECT),
        "Марка *",
        "Выберите марку...",
        &brand_options,
        brand,
        false,
    ));
    html.push_str(&select(
        "model",
        Some(ids::CAR_MODEL_SELECT),
        "Модель *",
        model_placeholder,
        &model_options,
        values.get("model"),
        brand.is_none(),
    ));
    html.push_str(&number_input("year", "Год выпуска *", values.get("year"), true));
    html.push_str(&number_input(
        "engine_volume",
        "Объем двигателя (л) *",
        values.get("engine_volume"),
        true,
    ));
    html.push_str(&number_input("mileage", "Пробег (км) *", values.get("mileage"), true));
    html.push_str("</div>");

    html.push_str(r#"<div class="grid grid-cols-2 gap-4">"#);
    for field in registry::CAR_FIELDS
        .iter()
        .filter(|f| !f.multiple && f.name != registry::STATE.name)
    {
        html.push_str(&coded_select(field, field.detail_key, values));
    }
    html.push_str("</div>");
    html.push_str(&checkbox_group(
        &registry::FEATURES,
        registry::FEATURES.detail_key,
        values,
    ));
    html
}
