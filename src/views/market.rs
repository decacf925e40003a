//! Market analytics pane.

use crate::dom::Document;
use crate::router::ids;
use crate::state::MarketPane;

/// Show either the chooser or the embedded dashboard. Returning to the
/// chooser blanks the frame so the report stops loading.
pub fn render(doc: &mut Document, pane: MarketPane) {
    match pane {
        MarketPane::Selection => {
            doc.show(ids::MARKET_SELECTION);
            doc.hide(ids::MARKET_DASHBOARD);
            doc.set_value(ids::POWERBI_IFRAME, "");
        }
        MarketPane::Dashboard(kind) => {
            doc.hide(ids::MARKET_SELECTION);
            doc.show(ids::MARKET_DASHBOARD);
            doc.set_html(ids::MARKET_DASHBOARD_TITLE, kind.title());
            doc.set_value(ids::POWERBI_IFRAME, kind.url());
        }
    }
}
