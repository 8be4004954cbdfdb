use serde::{Deserialize, Serialize};

/// Kind of listing page a fragment was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSourceType {
    Category,
    Seller,
    Catalog,
    UnifiedProduct,
}

impl std::fmt::Display for PageSourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSourceType::Category => write!(f, "category"),
            PageSourceType::Seller => write!(f, "seller"),
            PageSourceType::Catalog => write!(f, "catalog"),
            PageSourceType::UnifiedProduct => write!(f, "unified_product"),
        }
    }
}

/// A price as the scraper found it: either already numeric or the raw text
/// of the price element (e.g. `"12,999"` or `"$ 8,499.00"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Amount(f64),
    Text(String),
}

impl RawPrice {
    /// Numeric value of the price, or `None` when it cannot be read as a
    /// finite number. Sign is preserved; positivity is a filtering concern.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        match self {
            RawPrice::Amount(value) => Some(*value).filter(|v| v.is_finite()),
            RawPrice::Text(text) => {
                // Thousands separators and the currency sign are page chrome.
                let cleaned: String = text
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != ',' && *c != '$')
                    .collect();
                cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Amount(value)
    }
}

/// One unclassified listing as produced by the scraping collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListingFragment {
    /// Listing URL. Empty when the scraper could not find one.
    #[serde(default)]
    pub permalink: String,
    pub title: Option<String>,
    pub price: Option<RawPrice>,
    /// ISO 4217 code as shown on the page, e.g. `"MXN"`.
    pub currency: Option<String>,
    /// Condition label, e.g. `"Nuevo"` or `"Reacondicionado"`.
    pub condition: Option<String>,
    pub seller_id: Option<u64>,
    /// Any extra card text (subtitle, promo badge) scraped alongside the title.
    pub description: Option<String>,
}

/// A fragment tagged with the page it came from, as read from NDJSON input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedFragment {
    pub source_type: PageSourceType,
    #[serde(flatten)]
    pub fragment: RawListingFragment,
}
