//! Builds a [`ListingCard`] from a [`RawListingFragment`].
//!
//! Stage order is fixed: identity extraction, channel-item resolution,
//! filtering, enrichment. The assembler only copies fields and lets
//! [`ListingCard::try_from`] check the card invariants.

use std::sync::LazyLock;

use mlinv_core::{
    CardFields, CoreError, FilterConfig, ListingCard, PageSourceType, RawListingFragment, RawPrice,
    Vocabulary,
};

use crate::enrichment::needs_enrichment;
use crate::error::ClassifierError;
use crate::filter::FilterClassifier;
use crate::identity::{canonical_permalink, extract_ids, resolve_channel_item_id};

static DEFAULT_VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::default);

/// Classifies a [`RawListingFragment`] into a [`ListingCard`] using the
/// built-in keyword vocabulary.
///
/// # Errors
///
/// Returns [`ClassifierError::Invariant`] if the assembled card breaks a card
/// invariant. That indicates a bug, not bad input.
pub fn assemble_card(
    fragment: &RawListingFragment,
    source: PageSourceType,
    config: FilterConfig,
) -> Result<ListingCard, ClassifierError> {
    CardAssembler::new(FilterClassifier::new(config, &DEFAULT_VOCABULARY)).assemble(fragment, source)
}

/// Card assembly bound to one filter classifier (toggles plus vocabulary).
#[derive(Debug, Clone, Copy)]
pub struct CardAssembler<'v> {
    filter: FilterClassifier<'v>,
}

impl<'v> CardAssembler<'v> {
    #[must_use]
    pub fn new(filter: FilterClassifier<'v>) -> Self {
        Self { filter }
    }

    /// Run the classification pipeline for one fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Invariant`] if the assembled card breaks a
    /// card invariant.
    pub fn assemble(
        &self,
        fragment: &RawListingFragment,
        source: PageSourceType,
    ) -> Result<ListingCard, ClassifierError> {
        self.build(fragment, source).map_err(ClassifierError::from)
    }

    /// Pipeline body; the only failure is a broken card invariant.
    pub(crate) fn build(
        &self,
        fragment: &RawListingFragment,
        source: PageSourceType,
    ) -> Result<ListingCard, CoreError> {
        let permalink = canonical_permalink(&fragment.permalink);

        let ids = extract_ids(permalink);
        let (channel_item_id, id_source) = resolve_channel_item_id(&ids, permalink);
        let filter = self.filter.classify(fragment);
        let needs_enrichment = needs_enrichment(ids.item_id.as_deref(), fragment.seller_id, source);

        tracing::debug!(
            %channel_item_id,
            %id_source,
            %source,
            needs_enrichment,
            filtered_out = filter.filtered_out(),
            reasons = filter.reasons.len(),
            "assembled listing card"
        );

        ListingCard::try_from(CardFields {
            permalink: permalink.to_string(),
            title: fragment.title.clone(),
            price: fragment.price.as_ref().and_then(RawPrice::amount),
            currency: fragment.currency.clone(),
            condition: fragment.condition.clone(),
            seller_id: fragment.seller_id,
            channel_item_id,
            id_source,
            needs_enrichment,
            filtered_out: filter.filtered_out(),
            filtered_reasons: filter.reasons,
        })
    }
}
