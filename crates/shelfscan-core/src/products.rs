use serde::{Deserialize, Serialize};

/// Name written for a product card that carries no title element.
pub const NO_TITLE_SENTINEL: &str = "no title found";

/// One product scraped from a category listing and its detail page.
///
/// Field names on the wire match the catalog snapshot format consumed by the
/// downstream pricing tools, including the embedded spaces in the two price
/// keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Site-assigned SKU from the card's `data-sku` attribute.
    pub id: Option<String>,
    pub name: String,
    /// Absolute URL of the product detail page.
    pub link: String,
    /// Pre-discount price, integer and subunit digits concatenated (e.g. `"12990"`).
    #[serde(rename = "regular price")]
    pub regular_price: String,
    /// Current price when the item is discounted; empty otherwise.
    #[serde(rename = "promo price")]
    pub promo_price: String,
    /// Brand as published on the detail page.
    pub brand: Option<String>,
}

impl ProductRecord {
    /// Returns `true` when the listing showed a discounted price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !self.regular_price.is_empty() && !self.promo_price.is_empty()
    }
}

/// Regular and promo price strings resolved from a product card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTiers {
    pub regular: String,
    pub promo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(regular: &str, promo: &str) -> ProductRecord {
        ProductRecord {
            id: Some("123456".to_owned()),
            name: "Вода питьевая".to_owned(),
            link: "https://shop.example.com/products/voda".to_owned(),
            regular_price: regular.to_owned(),
            promo_price: promo.to_owned(),
            brand: Some("Святой Источник".to_owned()),
        }
    }

    #[test]
    fn serializes_price_keys_with_spaces() {
        let json = serde_json::to_value(record("500", "450")).unwrap();
        assert_eq!(json["regular price"], "500");
        assert_eq!(json["promo price"], "450");
        assert!(json.get("regular_price").is_none());
    }

    #[test]
    fn serializes_absent_fields_as_null() {
        let mut r = record("300", "");
        r.id = None;
        r.brand = None;
        let json = serde_json::to_value(r).unwrap();
        assert!(json["id"].is_null());
        assert!(json["brand"].is_null());
    }

    #[test]
    fn serialization_keeps_non_ascii_text() {
        let out = serde_json::to_string(&record("300", "")).unwrap();
        assert!(out.contains("Святой Источник"), "got: {out}");
        assert!(!out.contains("\\u"), "non-ASCII was escaped: {out}");
    }

    #[test]
    fn is_discounted_requires_both_prices() {
        assert!(record("500", "450").is_discounted());
        assert!(!record("300", "").is_discounted());
        assert!(!record("", "").is_discounted());
    }
}
