//! Identity extraction and channel-item resolution.
//!
//! Each URL shape has its own matcher and all of them run against every
//! permalink; [`resolve_channel_item_id`] then picks one id by fixed priority.
//! Nothing here decides policy or fails on malformed input.

use std::sync::LazyLock;

use mlinv_core::IdSource;
use regex::Regex;
use sha2::{Digest, Sha256};

/// `articulo.mercadolibre.com.mx/MLM-4714040498-iphone-15-_JM`
static ITEM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/MLM-([0-9]+)").expect("valid item id regex"));

/// `mercadolibre.com.mx/celular-samsung/p/MLM52050903`
static PRODUCT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/p/MLM([A-Za-z0-9]+)").expect("valid product id regex"));

/// `mercadolibre.com.mx/up/MLMU3779491406`
static UP_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/up/(MLMU[0-9]+)").expect("valid up id regex"));

/// Hex characters kept from the SHA-256 of a permalink (128 bits).
const HASH_ID_LEN: usize = 32;

/// Identifiers found in a permalink. A field is set only when its own URL
/// pattern matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedIds {
    pub product_id: Option<String>,
    pub item_id: Option<String>,
    pub up_id: Option<String>,
}

/// Run every identity matcher against `permalink`.
#[must_use]
pub fn extract_ids(permalink: &str) -> ExtractedIds {
    ExtractedIds {
        product_id: match_product_id(permalink),
        item_id: match_item_id(permalink),
        up_id: match_up_id(permalink),
    }
}

fn match_item_id(permalink: &str) -> Option<String> {
    ITEM_ID_RE
        .captures(permalink)
        .map(|caps| format!("MLM{}", &caps[1]))
}

fn match_product_id(permalink: &str) -> Option<String> {
    PRODUCT_ID_RE
        .captures(permalink)
        .map(|caps| format!("MLM{}", &caps[1]))
}

fn match_up_id(permalink: &str) -> Option<String> {
    UP_ID_RE.captures(permalink).map(|caps| caps[1].to_string())
}

/// Choose the canonical id for a listing.
///
/// Priority: product id, item id, up id, then a digest of `permalink`. The
/// result is never empty and depends only on `ids` and `permalink`.
#[must_use]
pub fn resolve_channel_item_id(ids: &ExtractedIds, permalink: &str) -> (String, IdSource) {
    [
        (&ids.product_id, IdSource::Product),
        (&ids.item_id, IdSource::Item),
        (&ids.up_id, IdSource::Up),
    ]
    .into_iter()
    .find_map(|(id, source)| id.as_ref().map(|id| (id.clone(), source)))
    .unwrap_or_else(|| (permalink_digest(permalink), IdSource::Hash))
}

fn permalink_digest(permalink: &str) -> String {
    let digest = Sha256::digest(permalink.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_ID_LEN);
    encoded
}

/// Permalink with surrounding whitespace and any `#fragment` removed.
///
/// Listing pages append tracking anchors (`#position=3&search_layout=grid`)
/// that must not change a listing's identity.
#[must_use]
pub fn canonical_permalink(permalink: &str) -> &str {
    let trimmed = permalink.trim();
    trimmed
        .split_once('#')
        .map_or(trimmed, |(without_fragment, _)| without_fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICULO: &str = "https://articulo.mercadolibre.com.mx/MLM-4714040498-iphone-15-128gb-_JM";
    const CATALOG: &str =
        "https://www.mercadolibre.com.mx/celular-samsung-galaxy-z-fold-7/p/MLM52050903";
    const UP: &str = "https://www.mercadolibre.com.mx/apple-iphone-16/up/MLMU3779491406";

    #[test]
    fn articulo_url_yields_item_id_only() {
        let ids = extract_ids(ARTICULO);
        assert_eq!(ids.item_id.as_deref(), Some("MLM4714040498"));
        assert!(ids.product_id.is_none());
        assert!(ids.up_id.is_none());
    }

    #[test]
    fn item_marker_as_last_segment() {
        let ids = extract_ids("https://articulo.mercadolibre.com.mx/MLM-123456789");
        assert_eq!(ids.item_id.as_deref(), Some("MLM123456789"));
    }

    #[test]
    fn catalog_url_yields_product_id_only() {
        let ids = extract_ids(CATALOG);
        assert_eq!(ids.product_id.as_deref(), Some("MLM52050903"));
        assert!(ids.item_id.is_none());
        assert!(ids.up_id.is_none());
    }

    #[test]
    fn catalog_token_may_be_alphanumeric() {
        let ids = extract_ids("https://www.mercadolibre.com.mx/x/p/MLMab12CD");
        assert_eq!(ids.product_id.as_deref(), Some("MLMab12CD"));
    }

    #[test]
    fn up_url_yields_up_id_only() {
        let ids = extract_ids(UP);
        assert_eq!(ids.up_id.as_deref(), Some("MLMU3779491406"));
        assert!(ids.item_id.is_none());
        assert!(ids.product_id.is_none());
    }

    #[test]
    fn markers_are_case_sensitive() {
        let ids = extract_ids("https://articulo.mercadolibre.com.mx/mlm-4714040498-x");
        assert_eq!(ids, ExtractedIds::default());
        let ids = extract_ids("https://www.mercadolibre.com.mx/P/MLM52050903");
        assert_eq!(ids, ExtractedIds::default());
    }

    #[test]
    fn redundant_markers_are_all_recorded() {
        let url = "https://www.mercadolibre.com.mx/p/MLM52050903/MLM-4714040498/up/MLMU77";
        let ids = extract_ids(url);
        assert_eq!(ids.product_id.as_deref(), Some("MLM52050903"));
        assert_eq!(ids.item_id.as_deref(), Some("MLM4714040498"));
        assert_eq!(ids.up_id.as_deref(), Some("MLMU77"));
    }

    #[test]
    fn malformed_permalink_yields_nothing() {
        assert_eq!(extract_ids(""), ExtractedIds::default());
        assert_eq!(extract_ids("not a url at all"), ExtractedIds::default());
        assert_eq!(extract_ids("/MLM-"), ExtractedIds::default());
    }

    #[test]
    fn product_id_outranks_item_id() {
        let url = "https://www.mercadolibre.com.mx/p/MLM52050903?ref=/MLM-4714040498";
        let ids = extract_ids(url);
        assert!(ids.item_id.is_some());
        let (id, source) = resolve_channel_item_id(&ids, url);
        assert_eq!(id, "MLM52050903");
        assert_eq!(source, IdSource::Product);
    }

    #[test]
    fn item_id_outranks_up_id() {
        let ids = ExtractedIds {
            product_id: None,
            item_id: Some("MLM1".to_string()),
            up_id: Some("MLMU2".to_string()),
        };
        assert_eq!(
            resolve_channel_item_id(&ids, "x"),
            ("MLM1".to_string(), IdSource::Item)
        );
    }

    #[test]
    fn up_id_used_when_alone() {
        let ids = extract_ids(UP);
        assert_eq!(
            resolve_channel_item_id(&ids, UP),
            ("MLMU3779491406".to_string(), IdSource::Up)
        );
    }

    #[test]
    fn hash_fallback_is_stable_and_non_empty() {
        let url = "https://listado.mercadolibre.com.mx/celulares#D[A:iphone]";
        let ids = extract_ids(url);
        let first = resolve_channel_item_id(&ids, url);
        let second = resolve_channel_item_id(&extract_ids(url), url);
        assert_eq!(first, second);
        assert_eq!(first.1, IdSource::Hash);
        assert_eq!(first.0.len(), HASH_ID_LEN);
        assert!(first.0.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_fallback_differs_per_permalink() {
        let a = resolve_channel_item_id(&ExtractedIds::default(), "https://a.example/1");
        let b = resolve_channel_item_id(&ExtractedIds::default(), "https://a.example/2");
        assert_ne!(a.0, b.0);
    }

    #[test]
    fn hash_fallback_for_empty_permalink_is_non_empty() {
        let (id, source) = resolve_channel_item_id(&ExtractedIds::default(), "");
        assert!(!id.is_empty());
        assert_eq!(source, IdSource::Hash);
    }

    #[test]
    fn canonical_permalink_drops_fragment_and_whitespace() {
        assert_eq!(
            canonical_permalink("  https://articulo.mercadolibre.com.mx/MLM-1-x#position=3 "),
            "https://articulo.mercadolibre.com.mx/MLM-1-x"
        );
        assert_eq!(canonical_permalink(ARTICULO), ARTICULO);
    }
}
