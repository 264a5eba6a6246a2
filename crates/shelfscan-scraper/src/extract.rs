//! Product field extraction from parsed listing and detail pages.
//!
//! Everything here is synchronous and returns owned values, so the parsed
//! [`Html`] tree never has to live across an `.await`.

use scraper::{ElementRef, Html, Selector};
use shelfscan_core::{PriceTiers, ProductRecord, NO_TITLE_SENTINEL};

use crate::markup::Markup;

/// Summary fields read from one product card on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: Option<String>,
    pub name: String,
    /// Link to the detail page as written in the markup (usually relative).
    pub href: Option<String>,
    pub prices: PriceTiers,
}

impl ProductCard {
    /// Completes the card with its absolute link and the brand resolved from
    /// the detail page.
    #[must_use]
    pub fn into_record(self, link: String, brand: Option<String>) -> ProductRecord {
        ProductRecord {
            id: self.id,
            name: self.name,
            link,
            regular_price: self.prices.regular,
            promo_price: self.prices.promo,
            brand,
        }
    }
}

/// Integer and subunit texts found inside one price region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceParts {
    pub integer: Option<String>,
    pub subunit: Option<String>,
}

impl PriceParts {
    fn joined(&self) -> String {
        format!(
            "{}{}",
            self.integer.as_deref().unwrap_or_default(),
            self.subunit.as_deref().unwrap_or_default()
        )
    }
}

/// Resolves the regular and promo price of a card from its two price regions.
///
/// The actual-price region yields `actual` (integer + subunit, each optional).
/// If the old-price region has an integer part the item is discounted: the old
/// price is regular and `actual` is promo. If the old-price region exists
/// without an integer part the item is not discounted: `actual` moves to
/// regular and promo is left empty.
#[must_use]
pub fn resolve_price_tiers(actual: Option<&PriceParts>, old: Option<&PriceParts>) -> PriceTiers {
    let actual_price = actual.map(PriceParts::joined).unwrap_or_default();

    match old {
        None => PriceTiers {
            regular: String::new(),
            promo: actual_price,
        },
        Some(old) if old.integer.is_some() => PriceTiers {
            regular: old.joined(),
            promo: actual_price,
        },
        Some(_) => PriceTiers {
            regular: actual_price,
            promo: String::new(),
        },
    }
}

/// Returns every product card on a listing page, or `None` when the page has
/// no product container at all.
#[must_use]
pub fn extract_cards(markup: &Markup, document: &Html) -> Option<Vec<ProductCard>> {
    let container = document.select(&markup.product_container).next()?;
    Some(
        container
            .select(&markup.product_card)
            .map(|card| extract_card(markup, card))
            .collect(),
    )
}

/// Reads the summary fields of a single product card.
#[must_use]
pub fn extract_card(markup: &Markup, card: ElementRef<'_>) -> ProductCard {
    let actual = price_parts(markup, card, &markup.actual_price_region);
    let old = price_parts(markup, card, &markup.old_price_region);

    ProductCard {
        id: markup.product_id.apply(card),
        name: markup
            .name
            .first(card)
            .unwrap_or_else(|| NO_TITLE_SENTINEL.to_owned()),
        href: markup.link.first(card),
        prices: resolve_price_tiers(actual.as_ref(), old.as_ref()),
    }
}

fn price_parts(markup: &Markup, card: ElementRef<'_>, region: &Selector) -> Option<PriceParts> {
    let region = card.select(region).next()?;
    Some(PriceParts {
        integer: markup.price_integer.first(region),
        subunit: markup.price_subunit.first(region),
    })
}

/// Reads the brand from a product detail page.
#[must_use]
pub fn extract_brand(markup: &Markup, document: &Html) -> Option<String> {
    markup.brand.first(document.root_element())
}

/// Labels of every pagination control on a listing page, in document order.
#[must_use]
pub fn pagination_labels(markup: &Markup, document: &Html) -> Vec<String> {
    markup.pagination_item.all(document.root_element())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
