use super::*;

#[test]
fn extract_domain_strips_scheme_and_path() {
    assert_eq!(
        extract_domain("https://shop.example.com/product/1"),
        "shop.example.com"
    );
}

#[test]
fn extract_domain_fallback_no_scheme() {
    assert_eq!(extract_domain("shop.example.com"), "shop.example.com");
}

#[test]
fn client_builds_with_default_config() {
    let config = shelfscan_core::AppConfig::default();
    assert!(CatalogClient::from_config(&config).is_ok());
}
