//! Marketplace listing cards.

use askama::Template;

use super::escape;
use crate::format::{currency, ru_date};
use crate::models::MarketplaceListing;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Template)]
#[template(path = "marketplace/listing_card.html")]
struct ListingCardTemplate<'a> {
    id: i64,
    color: &'static str,
    icon: &'static str,
    image_url: Option<&'a str>,
    name: &'a str,
    details: String,
    price: String,
    inactive: bool,
    address: &'a str,
    seller: &'a str,
    listed: String,
    description: Option<&'a str>,
    phone: Option<&'a str>,
    email: Option<&'a str>,
    own: bool,
}

pub fn listing_card(listing: &MarketplaceListing) -> String {
    let asset = &listing.asset;
    let price = listing
        .formatted_price
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| currency(listing.listing_price));
    ListingCardTemplate {
        id: listing.id,
        color: asset.asset_type.color(),
        icon: asset.asset_type.icon(),
        image_url: non_empty(asset.image_url.as_deref()),
        name: &asset.name,
        details: listing.key_details(),
        price,
        inactive: listing.is_active == Some(false),
        address: asset.address.as_deref().unwrap_or("Не указано"),
        seller: &listing.seller.username,
        listed: ru_date(listing.listed_at.as_deref()),
        description: non_empty(listing.description.as_deref()),
        phone: non_empty(listing.seller.phone.as_deref()),
        email: non_empty(listing.seller.email.as_deref()),
        own: listing.is_own_listing,
    }
    .render()
    .unwrap_or_default()
}

pub fn cards(listings: &[MarketplaceListing]) -> String {
    listings.iter().map(listing_card).collect()
}

/// Failure panel with a retry button.
pub fn error_state(message: &str) -> String {
    format!(
        r#"<div class="col-span-full text-center py-12"><i data-lucide="alert-circle" class="w-16 h-16 mx-auto mb-4 text-red-400"></i><h3 class="text-xl font-semibold mb-2 text-red-600">{}</h3><button data-action="load-listings" class="bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 transition">Попробовать снова</button></div>"#,
        escape(message)
    )
}
