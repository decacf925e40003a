use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::asset::AssetType;
use super::decimal;
use crate::format;

// ---------------------------------------------------------------------------
// PriceRange
// ---------------------------------------------------------------------------

/// Lower/upper bound of a predicted price.
///
/// The apartment endpoint sends `[lower, upper]` and the car endpoint sends
/// `{"lower": .., "upper": ..}`; both decode to this one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPriceRange {
    Pair(Vec<Value>),
    Bounds { lower: Value, upper: Value },
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = String;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        let (lower, upper) = match raw {
            RawPriceRange::Pair(items) => match items.as_slice() {
                [lower, upper] => (lower.clone(), upper.clone()),
                _ => return Err(format!("price range must have 2 items, got {}", items.len())),
            },
            RawPriceRange::Bounds { lower, upper } => (lower, upper),
        };
        Ok(PriceRange {
            lower: decimal::value_to_f64(&lower).ok_or("price range lower bound is not a number")?,
            upper: decimal::value_to_f64(&upper).ok_or("price range upper bound is not a number")?,
        })
    }
}

impl PriceRange {
    /// `"$500,000 - $600,000"`.
    pub fn display(&self) -> String {
        format!(
            "{} - {}",
            format::currency(self.lower),
            format::currency(self.upper)
        )
    }
}

// ---------------------------------------------------------------------------
// EvaluationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvaluationResult {
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub predicted_price: f64,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub formatted_range: Option<String>,
}

impl EvaluationResult {
    pub fn price_text(&self) -> String {
        match &self.formatted_price {
            Some(p) if !p.is_empty() => p.clone(),
            _ => format::currency(self.predicted_price),
        }
    }

    /// Range rendered from the decoded bounds, falling back to the server's
    /// preformatted text.
    pub fn range_text(&self) -> String {
        if let Some(range) = &self.price_range {
            return range.display();
        }
        self.formatted_range.clone().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Evaluation requests
// ---------------------------------------------------------------------------

/// Body of `POST /evaluate/apartment/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentEvaluation {
    pub rooms: Option<i64>,
    pub floor: Option<i64>,
    pub total_floors: Option<i64>,
    pub area: Option<i64>,
    pub month: u32,
    pub year: i32,
    pub kelishsa: String,
    pub mebel: String,
    pub district: String,
    pub mahalla: String,
    pub atrofda: Vec<String>,
    pub uyda: Vec<String>,
    pub bino_turi: String,
    pub qurilish_turi: String,
    pub renovation: String,
    pub owner: String,
    pub sanuzel: String,
    pub planirovka: String,
}

/// Body of `POST /evaluate-car/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarEvaluation {
    pub brand: String,
    pub model: String,
    pub year: Option<i64>,
    pub engine_volume: Option<f64>,
    pub fuel: String,
    pub transmission: String,
    pub body_type: String,
    pub mileage: Option<i64>,
    pub color: String,
    pub condition: String,
    pub state: String,
    pub ownership: String,
    pub owners_count: i64,
    pub features: Vec<String>,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationRequest {
    Apartment(ApartmentEvaluation),
    Car(CarEvaluation),
}

impl EvaluationRequest {
    pub fn asset_type(&self) -> AssetType {
        match self {
            EvaluationRequest::Apartment(_) => AssetType::Apartment,
            EvaluationRequest::Car(_) => AssetType::Car,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            EvaluationRequest::Apartment(_) => "/evaluate/apartment/",
            EvaluationRequest::Car(_) => "/evaluate-car/",
        }
    }

    pub fn report_endpoint(&self) -> &'static str {
        match self {
            EvaluationRequest::Apartment(_) => "/download-apartment-report/",
            EvaluationRequest::Car(_) => "/download-car-report/",
        }
    }

    pub fn to_value(&self) -> Value {
        let value = match self {
            EvaluationRequest::Apartment(a) => serde_json::to_value(a),
            EvaluationRequest::Car(c) => serde_json::to_value(c),
        };
        value.unwrap_or(Value::Null)
    }
}

/// The most recent evaluation, kept for the report download.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub request: EvaluationRequest,
    pub result: EvaluationResult,
}

impl Evaluation {
    /// The request fields plus `predicted_price` and the range as text.
    pub fn report_payload(&self) -> Value {
        let mut payload = self.request.to_value();
        if let Value::Object(map) = &mut payload {
            map.insert(
                "predicted_price".into(),
                serde_json::json!(self.result.predicted_price),
            );
            map.insert(
                "price_range".into(),
                Value::String(self.result.range_text()),
            );
        }
        payload
    }

    pub fn report_file_name(&self) -> String {
        format!("{}_evaluation_report.pdf", self.request.asset_type().as_str())
    }
}

// ---------------------------------------------------------------------------
// Car catalog
// ---------------------------------------------------------------------------

/// Defaults the catalog suggests for a car model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarSpecs {
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default, deserialize_with = "decimal::deserialize_opt")]
    pub engine_volume: Option<f64>,
}
