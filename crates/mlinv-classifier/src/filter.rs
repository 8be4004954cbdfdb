//! Business exclusion rules.
//!
//! Every rule is evaluated for every fragment so a card reports all the
//! reasons that apply, in [`FilterReason`] order.

use mlinv_core::{FilterConfig, FilterReason, RawListingFragment, RawPrice, Vocabulary};
use url::Url;

/// Reasons that fired for one fragment, in rule-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub reasons: Vec<FilterReason>,
}

impl FilterOutcome {
    #[must_use]
    pub fn filtered_out(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// Applies the exclusion rules with a given toggle set and vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct FilterClassifier<'v> {
    config: FilterConfig,
    vocabulary: &'v Vocabulary,
}

impl<'v> FilterClassifier<'v> {
    #[must_use]
    pub fn new(config: FilterConfig, vocabulary: &'v Vocabulary) -> Self {
        Self { config, vocabulary }
    }

    #[must_use]
    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Evaluate all rules against `fragment`.
    #[must_use]
    pub fn classify(&self, fragment: &RawListingFragment) -> FilterOutcome {
        let text = searchable_text(fragment);
        let vocabulary = self.vocabulary;

        let rules = [
            (
                FilterReason::Refurbished,
                !self.config.allow_refurbished && contains_any(&text, vocabulary.refurbished()),
            ),
            (
                FilterReason::Bundled,
                !self.config.allow_bundles && contains_any(&text, vocabulary.bundle()),
            ),
            (
                FilterReason::CarrierLocked,
                !self.config.allow_locked && contains_any(&text, vocabulary.locked()),
            ),
            (
                FilterReason::AccessoryOnly,
                contains_any(&text, vocabulary.accessory()),
            ),
            (
                FilterReason::InvalidTitle,
                fragment
                    .title
                    .as_deref()
                    .is_none_or(|title| title.trim().is_empty()),
            ),
            (
                FilterReason::InvalidPrice,
                !has_positive_price(fragment.price.as_ref()),
            ),
            (
                FilterReason::InvalidUrl,
                !is_absolute_web_url(&fragment.permalink),
            ),
        ];

        let reasons = rules
            .into_iter()
            .fold(Vec::new(), |mut reasons, (reason, fired)| {
                if fired {
                    reasons.push(reason);
                }
                reasons
            });

        FilterOutcome { reasons }
    }
}

/// Lowercased title, condition and description joined by newlines, so a
/// keyword never matches across two fields.
fn searchable_text(fragment: &RawListingFragment) -> String {
    [
        fragment.title.as_deref(),
        fragment.condition.as_deref(),
        fragment.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join("\n")
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

fn has_positive_price(price: Option<&RawPrice>) -> bool {
    price
        .and_then(RawPrice::amount)
        .is_some_and(|amount| amount > 0.0)
}

/// An `http`/`https` URL with a host. Relative paths, bare hosts and other
/// schemes are not usable permalinks.
fn is_absolute_web_url(permalink: &str) -> bool {
    Url::parse(permalink.trim()).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}
