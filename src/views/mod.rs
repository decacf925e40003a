//! HTML rendering for each view.
//!
//! Renderers are plain functions from state to markup. Page-sized views and
//! form widgets are askama templates under `templates/`, which escape every
//! interpolated value; small fragments are built here with [`escape`].
//! Interactive elements carry a `data-action` attribute (plus `data-*`
//! arguments) naming the [`PortfolioApp`](crate::PortfolioApp) handler they
//! trigger, so a rebuilt fragment needs no re-binding.

pub mod asset_detail;
pub mod chart;
pub mod dashboard;
pub mod evaluate;
pub mod fields;
pub mod market;
pub mod marketplace;
pub mod profile;
pub mod update;
pub mod wizard;

/// Escape text for use in element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Centered placeholder with an icon and a message, as used for empty and
/// failed sections.
pub(crate) fn placeholder(icon: &str, message: &str) -> String {
    format!(
        r#"<div class="h-80 flex items-center justify-center bg-gray-50 dark:bg-gray-700 rounded-lg"><div class="text-center text-gray-500 dark:text-gray-400"><i data-lucide="{}" class="w-12 h-12 mx-auto mb-2"></i><p>{}</p></div></div>"#,
        icon,
        escape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_markup() {
        assert_eq!(
            escape(r#"<b>"Дом" & 'сад'</b>"#),
            "&lt;b&gt;&quot;Дом&quot; &amp; &#39;сад&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }
}
