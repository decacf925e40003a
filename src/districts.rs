//! Tashkent districts (`tuman`) and their localities (`mahalla`), the
//! two-level location the apartment model is trained on.

use std::sync::OnceLock;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct District {
    pub district: String,
    pub localities: Vec<String>,
}

static DISTRICTS_JSON: &str = include_str!("../data/districts.json");
static DISTRICTS: OnceLock<Vec<District>> = OnceLock::new();

/// All districts in display order.
pub fn all() -> &'static [District] {
    DISTRICTS.get_or_init(|| match serde_json::from_str(DISTRICTS_JSON) {
        Ok(list) => list,
        Err(e) => {
            tracing::error!("Embedded district table is invalid: {}", e);
            Vec::new()
        }
    })
}

pub fn names() -> impl Iterator<Item = &'static str> {
    all().iter().map(|d| d.district.as_str())
}

/// Localities of `district`, or `None` for an unknown district.
pub fn localities(district: &str) -> Option<&'static [String]> {
    all()
        .iter()
        .find(|d| d.district == district)
        .map(|d| d.localities.as_slice())
}
