//! Price-history chart.
//!
//! The page holds at most one chart. [`ChartSlot::draw`] replaces the live
//! instance and destroys the previous one, the way a canvas chart must be torn
//! down before its canvas is reused.

use chrono::NaiveDate;

use super::{escape, placeholder};
use crate::format::{currency, month_label};
use crate::models::PriceHistory;

/// Series handed to the chart widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub current_value: f64,
    pub change_percentage: f64,
}

impl ChartData {
    /// History points plus the current value for this month. A history that
    /// already ends on this month has its last point replaced instead.
    pub fn from_history(history: &PriceHistory, today: NaiveDate) -> Self {
        let mut labels: Vec<String> = history.price_history.iter().map(|p| p.month.clone()).collect();
        let mut values: Vec<f64> = history.price_history.iter().map(|p| p.value).collect();
        let current = month_label(today);

        if !labels.contains(&current) {
            labels.push(current);
            values.push(history.current_value);
        } else if labels.last() == Some(&current) {
            if let Some(last) = values.last_mut() {
                *last = history.current_value;
            }
        }

        Self {
            labels,
            values,
            current_value: history.current_value,
            change_percentage: history.change_percentage,
        }
    }

    /// Change line shown above the chart.
    pub fn indicator_html(&self) -> String {
        let (color, icon) = if self.change_percentage >= 0.0 {
            ("text-green-600", "trending-up")
        } else {
            ("text-red-600", "trending-down")
        };
        let sign = if self.change_percentage > 0.0 { "+" } else { "" };
        format!(
            concat!(
                r#"<div class="flex items-center justify-between mb-4">"#,
                r#"<div class="flex items-center space-x-2"><i data-lucide="{icon}" class="w-5 h-5 {color}"></i>"#,
                r#"<span class="{color} font-semibold">{sign}{pct:.2}% за 30 дней</span></div>"#,
                r#"<div class="text-sm text-gray-500 dark:text-gray-400">Текущая стоимость: {value}</div></div>"#
            ),
            icon = icon,
            color = color,
            sign = sign,
            pct = self.change_percentage,
            value = escape(&currency(self.current_value)),
        )
    }
}

/// A drawn chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Increments with every draw on the slot.
    pub generation: u64,
    pub asset_id: i64,
    pub data: ChartData,
}

/// Holder of the single live chart.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<Chart>,
    draws: u64,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a new chart, destroying and returning the previous one.
    pub fn draw(&mut self, asset_id: i64, data: ChartData) -> Option<Chart> {
        self.draws += 1;
        let previous = self.current.replace(Chart {
            generation: self.draws,
            asset_id,
            data,
        });
        if let Some(old) = &previous {
            tracing::debug!(generation = old.generation, "Destroyed previous chart");
        }
        previous
    }

    pub fn clear(&mut self) -> Option<Chart> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Chart> {
        self.current.as_ref()
    }

    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

pub fn canvas_html(data: &ChartData) -> String {
    format!(
        r#"{}<div class="h-80"><canvas data-chart="price-history"></canvas></div>"#,
        data.indicator_html()
    )
}

pub fn empty_html() -> String {
    placeholder("trending-up", "История стоимости будет доступна после добавления данных")
}

pub fn error_html() -> String {
    placeholder("alert-circle", "Ошибка загрузки данных истории стоимости")
}
