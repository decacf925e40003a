//! Submitted form data and the payloads built from it.
//!
//! [`FormData`] mirrors the browser's: an ordered list of name/value pairs in
//! which checkbox groups repeat their name. The builders below turn a form
//! into evaluation requests, new-asset bodies and stored detail maps, filling
//! the same defaults for fields the user left empty.

use chrono::{Datelike, NaiveDate};

use crate::config::CAR_ADDRESS;
use crate::districts;
use crate::format::plain_number;
use crate::models::{
    ApartmentEvaluation, Asset, AssetDetails, AssetType, CarEvaluation, NewAsset,
};
use crate::registry::{self, Field};

// ---------------------------------------------------------------------------
// FormData
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add a value, keeping any existing ones (checkbox groups).
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries.push((name.to_string(), value.into()));
    }

    /// Replace every value of `name` with a single one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.entries.retain(|(k, _)| k != name);
        self.entries.push((name.to_string(), value.into()));
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(k, _)| k != name);
    }

    /// The value of `name`, or `None` when absent or blank.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Every non-blank value of a repeated field, in order.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Leading integer of the value, truncating any fraction.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.float(name).map(|f| f.trunc() as i64)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name)
            .and_then(|v| v.replace(',', ".").parse::<f64>().ok())
            .filter(|f| f.is_finite())
    }

    /// Names from `required` that are missing or blank.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required.iter().copied().filter(|n| !self.has(n)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Fields a car form must fill before it can be evaluated.
pub const CAR_REQUIRED: &[&str] = &[
    "state",
    "brand",
    "model",
    "year",
    "engine_volume",
    "fuel",
    "body_type",
    "color",
    "condition",
    "mileage",
];

/// Fields an apartment evaluation form must fill.
pub const APARTMENT_REQUIRED: &[&str] = &[
    "district",
    "mahalla",
    "rooms",
    "area",
    "floor",
    "total_floors",
];

// ---------------------------------------------------------------------------
// Evaluation requests
// ---------------------------------------------------------------------------

fn code_or_default(form: &FormData, field: &Field) -> String {
    match form.get(field.name) {
        Some(v) => field.resolve(v),
        None => field.default_code().unwrap_or("").to_string(),
    }
}

fn codes_or_default(form: &FormData, field: &Field) -> Vec<String> {
    let values = form.get_all(field.name);
    if values.is_empty() {
        field.defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values.iter().map(|v| field.resolve(v)).collect()
    }
}

pub fn apartment_evaluation(form: &FormData, today: NaiveDate) -> ApartmentEvaluation {
    ApartmentEvaluation {
        rooms: form.int("rooms"),
        floor: form.int("floor"),
        total_floors: form.int("total_floors"),
        area: form.int("area"),
        month: today.month(),
        year: today.year(),
        kelishsa: code_or_default(form, &registry::KELISHSA),
        mebel: code_or_default(form, &registry::MEBEL),
        district: form.get_or("district", "").to_string(),
        mahalla: form.get_or("mahalla", "").to_string(),
        atrofda: codes_or_default(form, &registry::ATROFDA),
        uyda: codes_or_default(form, &registry::UYDA),
        bino_turi: code_or_default(form, &registry::BINO_TURI),
        qurilish_turi: code_or_default(form, &registry::QURILISH_TURI),
        renovation: code_or_default(form, &registry::RENOVATION),
        owner: code_or_default(form, &registry::OWNER),
        sanuzel: code_or_default(form, &registry::SANUZEL),
        planirovka: code_or_default(form, &registry::PLANIROVKA),
    }
}

pub fn car_evaluation(form: &FormData, today: NaiveDate) -> CarEvaluation {
    CarEvaluation {
        brand: form.get_or("brand", "").to_string(),
        model: form.get_or("model", "").to_string(),
        year: form.int("year"),
        engine_volume: form.float("engine_volume"),
        fuel: form.get_or("fuel", "").to_string(),
        transmission: code_or_default(form, &registry::TRANSMISSION),
        body_type: form.get_or("body_type", "").to_string(),
        mileage: form.int("mileage"),
        color: code_or_default(form, &registry::COLOR),
        condition: code_or_default(form, &registry::CONDITION),
        state: form.get_or("state", "").to_string(),
        ownership: code_or_default(form, &registry::OWNERSHIP),
        owners_count: form.int("owners_count").filter(|n| *n > 0).unwrap_or(1),
        features: form.get_all("features"),
        month: today.month(),
    }
}

/// Whether an add-asset apartment form carries enough to be evaluated.
pub fn can_evaluate_apartment(form: &FormData) -> bool {
    ["district", "mahalla", "area", "rooms"]
        .iter()
        .all(|n| form.has(n))
}

// ---------------------------------------------------------------------------
// Detail maps
// ---------------------------------------------------------------------------

fn label_or(form: &FormData, field: &Field, placeholder: &str) -> String {
    form.get(field.name)
        .map(|v| field.display(v))
        .unwrap_or_else(|| placeholder.to_string())
}

fn labels_or(form: &FormData, field: &Field, placeholder: &str) -> String {
    field
        .display_list(&form.get_all(field.name))
        .unwrap_or_else(|| placeholder.to_string())
}

/// Stored details of an apartment, keyed and valued by display labels.
pub fn apartment_details(form: &FormData) -> AssetDetails {
    let mut d = AssetDetails::new();
    d.insert("Район", form.get_or("district", "Не указан"));
    d.insert("Махалля", form.get_or("mahalla", "Не указана"));
    if let Some(rooms) = form.get("rooms") {
        d.insert("Кол-во комнат", rooms);
    }
    if let Some(area) = form.get("area") {
        d.insert("Площадь", format!("{} м²", area));
    }
    if let Some(floor) = form.get("floor") {
        d.insert("Этаж", floor);
    }
    if let Some(total) = form.get("total_floors") {
        d.insert("Всего этажей", total);
    }
    d.insert("Тип здания", label_or(form, &registry::BINO_TURI, "Не указан"));
    d.insert("Тип строения", label_or(form, &registry::QURILISH_TURI, "Не указан"));
    d.insert("Планировка", label_or(form, &registry::PLANIROVKA, "Не указана"));
    d.insert("Ремонт", label_or(form, &registry::RENOVATION, "Не указан"));
    d.insert("Санузел", label_or(form, &registry::SANUZEL, "Не указан"));
    d.insert("Собственность", label_or(form, &registry::OWNER, "Не указан"));
    d.insert("Мебель", label_or(form, &registry::MEBEL, "Не указана"));
    d.insert("Можно договориться", label_or(form, &registry::KELISHSA, "Не указано"));
    d.insert("В доме", labels_or(form, &registry::UYDA, "Не указано"));
    d.insert("Рядом с домом", labels_or(form, &registry::ATROFDA, "Не указано"));
    d
}

/// Stored details of a car.
pub fn car_details(form: &FormData) -> AssetDetails {
    let mut d = AssetDetails::new();
    d.insert("Регион", label_or(form, &registry::STATE, "Не указан"));
    d.insert("Марка", form.get_or("brand", ""));
    d.insert("Модель", form.get_or("model", ""));
    d.insert("Год выпуска", form.get_or("year", ""));
    d.insert("Объем двигателя", format!("{} л", form.get_or("engine_volume", "")));
    d.insert("Топливо", label_or(form, &registry::FUEL, "Не указано"));
    d.insert("Тип собственности", label_or(form, &registry::OWNERSHIP, "Частная"));
    d.insert("Тип кузова", label_or(form, &registry::BODY_TYPE, "Не указан"));
    d.insert("Цвет", label_or(form, &registry::COLOR, "Не указан"));
    d.insert("Состояние", label_or(form, &registry::CONDITION, "Не указано"));
    d.insert("Владельцев", label_or(form, &registry::OWNERS_COUNT, "1"));
    d.insert("Пробег", format!("{} км", form.get_or("mileage", "")));
    d.insert("Коробка передач", label_or(form, &registry::TRANSMISSION, "Механическая"));
    d.insert("Опции", labels_or(form, &registry::FEATURES, "Не указаны"));
    d
}

// ---------------------------------------------------------------------------
// New assets
// ---------------------------------------------------------------------------

pub fn new_apartment(form: &FormData, portfolio: i64, current_value: f64) -> NewAsset {
    NewAsset {
        name: form.get_or("name", "").to_string(),
        asset_type: AssetType::Apartment,
        address: form.get_or("location", "").to_string(),
        portfolio,
        current_value,
        area: form.float("area"),
        rooms: form.int("rooms"),
        floor: form.int("floor"),
        total_floors: form.int("total_floors"),
        description: apartment_details(form).to_json(),
        ..NewAsset::default()
    }
}

pub fn new_car(form: &FormData, portfolio: i64) -> NewAsset {
    NewAsset {
        name: form.get_or("name", "").to_string(),
        asset_type: AssetType::Car,
        address: CAR_ADDRESS.to_string(),
        portfolio,
        current_value: form.float("current_value").unwrap_or(0.0),
        brand: form.get("brand").map(str::to_string),
        model: form.get("model").map(str::to_string),
        year: form.int("year"),
        mileage: form.int("mileage"),
        description: car_details(form).to_json(),
        ..NewAsset::default()
    }
}

// ---------------------------------------------------------------------------
// Pre-population from stored details
// ---------------------------------------------------------------------------

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value.starts_with("Не указан")
}

fn detail<'a>(details: &'a AssetDetails, key: &str) -> Option<&'a str> {
    details.get(key).map(str::trim).filter(|v| !is_placeholder(v))
}

fn strip_unit(value: &str, unit: &str) -> String {
    value.trim_end_matches(unit).trim().to_string()
}

fn prefill_coded(form: &mut FormData, details: &AssetDetails, fields: &[&Field]) {
    for field in fields {
        let Some(stored) = detail(details, field.detail_key) else {
            continue;
        };
        if field.multiple {
            for code in field.resolve_list(stored) {
                form.append(field.name, code);
            }
        } else {
            form.set(field.name, field.resolve(stored));
        }
    }
}

/// Form values for re-evaluating an apartment, recovered from its stored
/// details and typed columns.
pub fn prefill_apartment(asset: &Asset) -> FormData {
    let details = asset.details();
    let mut form = FormData::new();

    if let Some(district) = detail(&details, "Район") {
        if districts::localities(district).is_some() {
            form.set("district", district);
            if let Some(mahalla) = detail(&details, "Махалля") {
                form.set("mahalla", mahalla);
            }
        }
    }

    let number = |key: &str, unit: &str, column: Option<String>| {
        detail(&details, key)
            .map(|v| strip_unit(v, unit))
            .or(column)
    };
    if let Some(v) = number("Кол-во комнат", "", asset.rooms.map(|n| n.to_string())) {
        form.set("rooms", v);
    }
    if let Some(v) = number("Площадь", "м²", asset.area.map(plain_number)) {
        form.set("area", v);
    }
    if let Some(v) = number("Этаж", "", asset.floor.map(|n| n.to_string())) {
        form.set("floor", v);
    }
    if let Some(v) = number("Всего этажей", "", asset.total_floors.map(|n| n.to_string())) {
        form.set("total_floors", v);
    }

    prefill_coded(&mut form, &details, registry::APARTMENT_FIELDS);
    form
}

/// Form values for re-evaluating a car.
pub fn prefill_car(asset: &Asset) -> FormData {
    let details = asset.details();
    let mut form = FormData::new();

    let text = |key: &str, column: Option<String>| {
        detail(&details, key).map(str::to_string).or(column)
    };
    if let Some(v) = text("Марка", asset.brand.clone()) {
        form.set("brand", v);
    }
    if let Some(v) = text("Модель", asset.model.clone()) {
        form.set("model", v);
    }
    if let Some(v) = text("Год выпуска", asset.year.map(|y| y.to_string())) {
        form.set("year", v);
    }
    if let Some(v) = detail(&details, "Объем двигателя") {
        form.set("engine_volume", strip_unit(v, "л"));
    }
    let mileage = detail(&details, "Пробег")
        .map(|v| strip_unit(v, "км"))
        .or(asset.mileage.map(|m| m.to_string()));
    if let Some(v) = mileage {
        form.set("mileage", v);
    }

    prefill_coded(&mut form, &details, registry::CAR_FIELDS);
    form
}
