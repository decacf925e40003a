use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::decimal;

// ---------------------------------------------------------------------------
// AssetType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    Apartment,
    Car,
    #[serde(other)]
    Other,
}

impl AssetType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "apartment" => Some(AssetType::Apartment),
            "car" => Some(AssetType::Car),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Apartment => "apartment",
            AssetType::Car => "car",
            AssetType::Other => "other",
        }
    }

    /// Short badge label used on dashboard cards.
    pub fn badge(self) -> &'static str {
        match self {
            AssetType::Apartment => "Квартира",
            AssetType::Car => "Авто",
            AssetType::Other => "Актив",
        }
    }

    /// Full label used in parameter lists.
    pub fn label(self) -> &'static str {
        match self {
            AssetType::Car => "Автомобиль",
            _ => "Квартира",
        }
    }

    /// Genitive form for headings such as "Оценка квартиры".
    pub fn genitive(self) -> &'static str {
        match self {
            AssetType::Car => "автомобиля",
            _ => "квартиры",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AssetType::Car => "car",
            _ => "building-2",
        }
    }

    /// Tailwind colour family for the type.
    pub fn color(self) -> &'static str {
        match self {
            AssetType::Car => "green",
            _ => "blue",
        }
    }
}

// ---------------------------------------------------------------------------
// AssetDetails: ordered label/value map stored in `description`
// ---------------------------------------------------------------------------

/// Human-readable key/value details of an asset, in insertion order.
///
/// Stored on the server as a JSON-encoded object inside the asset's
/// `description`. Non-string values are kept in their JSON text form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetDetails {
    entries: Vec<(String, String)>,
}

impl AssetDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON-encoded detail blob. Malformed or non-object input yields
    /// an empty map.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::debug!("Asset details are not JSON: {}", e);
                Self::default()
            }
        }
    }

    /// Build from an already decoded JSON value (object or encoded string).
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                entries: map
                    .iter()
                    .map(|(k, v)| (k.clone(), value_text(v)))
                    .collect(),
            },
            Value::String(s) => Self::parse(s),
            _ => Self::default(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as the JSON object string stored in `description`.
    pub fn to_json(&self) -> String {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map).to_string()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for AssetDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Asset {
    pub id: i64,
    #[serde(default)]
    pub portfolio: Option<i64>,
    #[serde(default)]
    pub portfolio_name: Option<String>,
    #[serde(default)]
    pub asset_type: AssetType,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub current_value: f64,
    #[serde(default, deserialize_with = "decimal::deserialize_opt")]
    pub area: Option<f64>,
    #[serde(default)]
    pub rooms: Option<i64>,
    #[serde(default)]
    pub floor: Option<i64>,
    #[serde(default)]
    pub total_floors: Option<i64>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Asset {
    /// Decode the detail map stored in `description`.
    pub fn details(&self) -> AssetDetails {
        self.description
            .as_deref()
            .map(AssetDetails::parse)
            .unwrap_or_default()
    }

    /// Address or the "not specified" placeholder.
    pub fn address_or_placeholder(&self) -> &str {
        match self.address.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => "Не указано",
        }
    }
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Portfolio {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "decimal::deserialize_opt")]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub asset_count: Option<i64>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct NewPortfolio {
    pub name: String,
    pub description: String,
}

/// Body of `POST /assets/`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct NewAsset {
    pub name: String,
    pub asset_type: AssetType,
    pub address: String,
    pub portfolio: i64,
    pub current_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_floors: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    pub description: String,
}

/// Body of `PATCH /assets/{id}/` after a re-evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct AssetPatch {
    pub current_value: f64,
    pub description: String,
}
