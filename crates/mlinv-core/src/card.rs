use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Identity scheme that produced a card's `channel_item_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSource {
    /// Catalog product id from a `/p/MLM…` URL.
    Product,
    /// Single-item id from a `/MLM-<digits>` URL.
    Item,
    /// Unified-product id from a `/up/MLMU…` URL.
    Up,
    /// Digest of the permalink; no structured id was found.
    Hash,
}

impl std::fmt::Display for IdSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdSource::Product => write!(f, "product"),
            IdSource::Item => write!(f, "item"),
            IdSource::Up => write!(f, "up"),
            IdSource::Hash => write!(f, "hash"),
        }
    }
}

/// Why a card was filtered out. Variant order is the order reasons are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterReason {
    Refurbished,
    Bundled,
    CarrierLocked,
    AccessoryOnly,
    InvalidTitle,
    InvalidPrice,
    InvalidUrl,
}

impl FilterReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterReason::Refurbished => "refurbished",
            FilterReason::Bundled => "bundled",
            FilterReason::CarrierLocked => "carrier_locked",
            FilterReason::AccessoryOnly => "accessory_only",
            FilterReason::InvalidTitle => "invalid_title",
            FilterReason::InvalidPrice => "invalid_price",
            FilterReason::InvalidUrl => "invalid_url",
        }
    }
}

impl std::fmt::Display for FilterReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unchecked field set for a [`ListingCard`]. Converting it with
/// [`ListingCard::try_from`] enforces the card invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFields {
    pub permalink: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub condition: Option<String>,
    pub seller_id: Option<u64>,
    pub channel_item_id: String,
    pub id_source: IdSource,
    pub needs_enrichment: bool,
    pub filtered_out: bool,
    #[serde(default)]
    pub filtered_reasons: Vec<FilterReason>,
}

/// A fully classified listing. Read-only once built.
///
/// Guaranteed: `channel_item_id` is non-empty and `filtered_out` is true
/// exactly when `filtered_reasons` is non-empty. Deserialization goes through
/// the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CardFields")]
pub struct ListingCard {
    permalink: String,
    title: Option<String>,
    price: Option<f64>,
    currency: Option<String>,
    condition: Option<String>,
    seller_id: Option<u64>,
    channel_item_id: String,
    id_source: IdSource,
    needs_enrichment: bool,
    filtered_out: bool,
    filtered_reasons: Vec<FilterReason>,
}

impl TryFrom<CardFields> for ListingCard {
    type Error = CoreError;

    fn try_from(fields: CardFields) -> Result<Self, Self::Error> {
        if fields.channel_item_id.is_empty() {
            return Err(CoreError::EmptyChannelItemId {
                permalink: fields.permalink,
            });
        }
        if fields.filtered_out == fields.filtered_reasons.is_empty() {
            return Err(CoreError::ReasonMismatch {
                permalink: fields.permalink,
                filtered_out: fields.filtered_out,
                reason_count: fields.filtered_reasons.len(),
            });
        }

        Ok(Self {
            permalink: fields.permalink,
            title: fields.title,
            price: fields.price,
            currency: fields.currency,
            condition: fields.condition,
            seller_id: fields.seller_id,
            channel_item_id: fields.channel_item_id,
            id_source: fields.id_source,
            needs_enrichment: fields.needs_enrichment,
            filtered_out: fields.filtered_out,
            filtered_reasons: fields.filtered_reasons,
        })
    }
}

impl ListingCard {
    #[must_use]
    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Parsed price; `None` when missing or unreadable on the page.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    #[must_use]
    pub fn seller_id(&self) -> Option<u64> {
        self.seller_id
    }

    #[must_use]
    pub fn channel_item_id(&self) -> &str {
        &self.channel_item_id
    }

    #[must_use]
    pub fn id_source(&self) -> IdSource {
        self.id_source
    }

    #[must_use]
    pub fn needs_enrichment(&self) -> bool {
        self.needs_enrichment
    }

    #[must_use]
    pub fn filtered_out(&self) -> bool {
        self.filtered_out
    }

    #[must_use]
    pub fn filtered_reasons(&self) -> &[FilterReason] {
        &self.filtered_reasons
    }

    /// Neither filtered out nor waiting on enrichment: safe to export as-is.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.filtered_out && !self.needs_enrichment
    }
}
