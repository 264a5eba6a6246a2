//! Declarative selector table for the category and detail page markup.
//!
//! Site-specific knowledge lives entirely in [`MarkupRules`]: each field maps
//! to a CSS selector plus an [`Extract`] rule. [`Markup::compile`] parses the
//! selectors once, and the scrape pipeline reads every field through the same
//! generic [`CompiledRule::first`] routine.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// How a value is read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Concatenated descendant text, whitespace-trimmed.
    Text,
    /// Value of the named attribute, whitespace-trimmed.
    Attr(&'static str),
}

impl Extract {
    /// Applies the rule to `element`. A missing attribute is `None`; an
    /// element with no text yields an empty string.
    #[must_use]
    pub fn apply(self, element: ElementRef<'_>) -> Option<String> {
        match self {
            Extract::Text => Some(element.text().collect::<String>().trim().to_owned()),
            Extract::Attr(name) => element.value().attr(name).map(|v| v.trim().to_owned()),
        }
    }
}

/// One field of the table: where the value lives and how to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub selector: &'static str,
    pub extract: Extract,
}

impl FieldRule {
    const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            extract: Extract::Text,
        }
    }

    const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            extract: Extract::Attr(name),
        }
    }
}

/// Selector table for a category listing and its product detail pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRules {
    /// Element wrapping every product card on a listing page.
    pub product_container: &'static str,
    /// One product card; matched inside the container.
    pub product_card: &'static str,
    /// Product identifier, read from the card element itself.
    pub product_id: Extract,
    pub name: FieldRule,
    /// Relative link to the product detail page.
    pub link: FieldRule,
    /// Region holding the current (possibly discounted) price.
    pub actual_price_region: &'static str,
    /// Region holding the pre-discount price.
    pub old_price_region: &'static str,
    /// Integer part of a price, matched inside a price region.
    pub price_integer: FieldRule,
    /// Subunit part of a price, matched inside a price region.
    pub price_subunit: FieldRule,
    /// Brand on the product detail page.
    pub brand: FieldRule,
    /// Pagination control on a listing page; the last one's label is the page count.
    pub pagination_item: FieldRule,
}

impl Default for MarkupRules {
    fn default() -> Self {
        Self {
            product_container: "div#products-inner",
            product_card: "div[data-sku]",
            product_id: Extract::Attr("data-sku"),
            name: FieldRule::text("span.product-card-name__text"),
            link: FieldRule::attr("a.product-card-name", "href"),
            actual_price_region: "div.product-unit-prices__actual-wrapper",
            old_price_region: "div.product-unit-prices__old-wrapper",
            price_integer: FieldRule::text("span.product-price__sum-rubles"),
            price_subunit: FieldRule::text("span.product-price__sum-penny"),
            brand: FieldRule::attr(r#"meta[itemprop="brand"]"#, "content"),
            pagination_item: FieldRule::text("a.v-pagination__item"),
        }
    }
}

/// A [`FieldRule`] with its selector parsed.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    selector: Selector,
    extract: Extract,
}

impl CompiledRule {
    fn compile(rule: FieldRule) -> Result<Self, ScraperError> {
        Ok(Self {
            selector: parse_selector(rule.selector)?,
            extract: rule.extract,
        })
    }

    /// Reads the field from the first matching descendant of `scope`.
    ///
    /// `None` means the element (or its attribute) is absent; that is a normal
    /// outcome, not an error.
    #[must_use]
    pub fn first(&self, scope: ElementRef<'_>) -> Option<String> {
        scope
            .select(&self.selector)
            .next()
            .and_then(|el| self.extract.apply(el))
    }

    /// Reads the field from every matching descendant of `scope`, in document order.
    #[must_use]
    pub fn all(&self, scope: ElementRef<'_>) -> Vec<String> {
        scope
            .select(&self.selector)
            .filter_map(|el| self.extract.apply(el))
            .collect()
    }
}

/// Compiled form of [`MarkupRules`].
#[derive(Debug, Clone)]
pub struct Markup {
    pub(crate) product_container: Selector,
    pub(crate) product_card: Selector,
    pub(crate) product_id: Extract,
    pub(crate) name: CompiledRule,
    pub(crate) link: CompiledRule,
    pub(crate) actual_price_region: Selector,
    pub(crate) old_price_region: Selector,
    pub(crate) price_integer: CompiledRule,
    pub(crate) price_subunit: CompiledRule,
    pub(crate) brand: CompiledRule,
    pub(crate) pagination_item: CompiledRule,
}

impl Markup {
    /// Parses every selector in `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] naming the first selector that
    /// fails to parse.
    pub fn compile(rules: &MarkupRules) -> Result<Self, ScraperError> {
        Ok(Self {
            product_container: parse_selector(rules.product_container)?,
            product_card: parse_selector(rules.product_card)?,
            product_id: rules.product_id,
            name: CompiledRule::compile(rules.name)?,
            link: CompiledRule::compile(rules.link)?,
            actual_price_region: parse_selector(rules.actual_price_region)?,
            old_price_region: parse_selector(rules.old_price_region)?,
            price_integer: CompiledRule::compile(rules.price_integer)?,
            price_subunit: CompiledRule::compile(rules.price_subunit)?,
            brand: CompiledRule::compile(rules.brand)?,
            pagination_item: CompiledRule::compile(rules.pagination_item)?,
        })
    }
}

/// Parses raw HTML into a queryable tree.
///
/// html5ever recovers from any input, so this never fails: unreadable markup
/// simply produces a tree in which nothing matches.
#[must_use]
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

fn parse_selector(selector: &'static str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_compile() {
        assert!(Markup::compile(&MarkupRules::default()).is_ok());
    }

    #[test]
    fn compile_rejects_invalid_selector() {
        let rules = MarkupRules {
            product_card: "div:no-such-pseudo",
            ..MarkupRules::default()
        };
        let err = Markup::compile(&rules).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidSelector { ref selector, .. } if selector == "div:no-such-pseudo"),
            "expected InvalidSelector, got: {err:?}"
        );
    }

    #[test]
    fn text_rule_trims_whitespace() {
        let doc = parse_document("<div><span class=\"n\">\n  Вода  \n</span></div>");
        let rule = CompiledRule::compile(FieldRule::text("span.n")).unwrap();
        assert_eq!(rule.first(doc.root_element()).as_deref(), Some("Вода"));
    }

    #[test]
    fn attr_rule_reads_attribute() {
        let doc = parse_document(r#"<html><head><meta itemprop="brand" content="Aqua"></head></html>"#);
        let rule = CompiledRule::compile(FieldRule::attr(r#"meta[itemprop="brand"]"#, "content"))
            .unwrap();
        assert_eq!(rule.first(doc.root_element()).as_deref(), Some("Aqua"));
    }

    #[test]
    fn attr_rule_missing_attribute_is_none() {
        let doc = parse_document(r#"<meta itemprop="brand">"#);
        let rule = CompiledRule::compile(FieldRule::attr(r#"meta[itemprop="brand"]"#, "content"))
            .unwrap();
        assert!(rule.first(doc.root_element()).is_none());
    }

    #[test]
    fn missing_element_is_none() {
        let doc = parse_document("<p>nothing here</p>");
        let rule = CompiledRule::compile(FieldRule::text("span.n")).unwrap();
        assert!(rule.first(doc.root_element()).is_none());
        assert!(rule.all(doc.root_element()).is_empty());
    }

    #[test]
    fn all_returns_matches_in_document_order() {
        let doc = parse_document(
            r#"<nav><a class="p">1</a><a class="p">2</a><a class="p">3</a></nav>"#,
        );
        let rule = CompiledRule::compile(FieldRule::text("a.p")).unwrap();
        assert_eq!(rule.all(doc.root_element()), vec!["1", "2", "3"]);
    }

    #[test]
    fn parse_document_tolerates_garbage() {
        let doc = parse_document("<<<>>> \u{0} </div></div>");
        let rule = CompiledRule::compile(FieldRule::text("span.n")).unwrap();
        assert!(rule.first(doc.root_element()).is_none());
    }
}
