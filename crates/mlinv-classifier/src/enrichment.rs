//! Decides whether a listing needs a follow-up detail fetch.
//!
//! This never affects filtering: an incomplete listing is enriched, not
//! dropped.

use mlinv_core::PageSourceType;

/// `true` when the card cannot be exported without fetching the item page.
///
/// Conditions, OR-combined:
/// - no single-item id, except on unified-product pages where the up
///   reference is the listing's identity;
/// - no seller id;
/// - the fragment came from a catalog page (it names a product, not a
///   purchasable item);
/// - the fragment came from a unified-product page and has no seller.
#[must_use]
pub fn needs_enrichment(
    item_id: Option<&str>,
    seller_id: Option<u64>,
    source: PageSourceType,
) -> bool {
    let is_up_page = source == PageSourceType::UnifiedProduct;

    let missing_item = item_id.is_none() && !is_up_page;
    let missing_seller = seller_id.is_none();
    let catalog_page = source == PageSourceType::Catalog;
    let up_without_seller = is_up_page && seller_id.is_none();

    missing_item || missing_seller || catalog_page || up_without_seller
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_category_listing_needs_nothing() {
        assert!(!needs_enrichment(
            Some("MLM1"),
            Some(7),
            PageSourceType::Category
        ));
        assert!(!needs_enrichment(Some("MLM1"), Some(7), PageSourceType::Seller));
    }

    #[test]
    fn missing_item_id_needs_enrichment() {
        assert!(needs_enrichment(None, Some(7), PageSourceType::Category));
        assert!(needs_enrichment(None, Some(7), PageSourceType::Seller));
    }

    #[test]
    fn missing_seller_needs_enrichment() {
        assert!(needs_enrichment(Some("MLM1"), None, PageSourceType::Seller));
    }

    #[test]
    fn catalog_always_needs_enrichment() {
        assert!(needs_enrichment(Some("MLM1"), Some(7), PageSourceType::Catalog));
    }

    #[test]
    fn unified_product_with_seller_is_complete() {
        assert!(!needs_enrichment(None, Some(7), PageSourceType::UnifiedProduct));
    }

    #[test]
    fn unified_product_without_seller_needs_enrichment() {
        assert!(needs_enrichment(None, None, PageSourceType::UnifiedProduct));
    }
}
