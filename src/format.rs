//! Display formatting shared by the views: US-dollar amounts, signed
//! percentages, Russian-style dates and the month labels used on the price
//! history chart.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Group an integer with `,` every three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

/// Whole dollars with thousands separators: `$1,234,568`.
pub fn currency(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() as i64 } else { 0 };
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded).trim_start_matches('-'))
}

/// Percentage with a leading `+` for positive values: `+5.0%`, `-2.3%`.
pub fn signed_percent(value: f64, decimals: usize) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.*}%", sign, decimals, value)
}

/// Absolute change implied by a current value and its percentage change.
///
/// `value - value / (1 + pct / 100)`; zero when `pct` is zero.
pub fn absolute_change(value: f64, pct: f64) -> f64 {
    if pct == 0.0 {
        return 0.0;
    }
    let past = value / (1.0 + pct / 100.0);
    value - past
}

/// A number as a form input holds it: no grouping, no trailing `.0`.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `dd.mm.yyyy` for an ISO-8601 timestamp or date. Empty input renders as
/// `Не указано`; anything unparsable is returned as-is.
pub fn ru_date(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => "Не указано".to_string(),
        Some(s) => match parse_date(s) {
            Some(d) => format!("{:02}.{:02}.{}", d.day(), d.month(), d.year()),
            None => s.to_string(),
        },
    }
}

/// Month label in the price history's own format, e.g. `Mar 2025`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
