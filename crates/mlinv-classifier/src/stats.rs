use mlinv_core::ListingCard;
use serde::{Deserialize, Serialize};

/// Summary counters over a set of classified cards.
///
/// Always recomputed from cards; `ready <= valid <= total` and
/// `needs_enrichment <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    /// Cards that were not filtered out.
    pub valid: usize,
    /// Cards needing enrichment, filtered or not.
    pub needs_enrichment: usize,
    /// Cards neither filtered out nor needing enrichment.
    pub ready: usize,
}

impl BatchStats {
    /// Cards that were filtered out. Saturates at zero for inconsistent
    /// counts read from outside.
    #[must_use]
    pub fn filtered_out(&self) -> usize {
        self.total.saturating_sub(self.valid)
    }
}

/// Count cards into a [`BatchStats`]. Order of `cards` does not matter.
#[must_use]
pub fn compute_batch_stats<'a, I>(cards: I) -> BatchStats
where
    I: IntoIterator<Item = &'a ListingCard>,
{
    cards
        .into_iter()
        .fold(BatchStats::default(), |mut stats, card| {
            stats.total += 1;
            if !card.filtered_out() {
                stats.valid += 1;
            }
            if card.needs_enrichment() {
                stats.needs_enrichment += 1;
            }
            if card.is_ready() {
                stats.ready += 1;
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use mlinv_core::{CardFields, FilterReason, IdSource};

    use super::*;

    fn make_card(id: usize, filtered_out: bool, needs_enrichment: bool) -> ListingCard {
        ListingCard::try_from(CardFields {
            permalink: format!("https://articulo.mercadolibre.com.mx/MLM-{id}-x"),
            title: Some("Moto G84".to_string()),
            price: Some(4_299.0),
            currency: Some("MXN".to_string()),
            condition: None,
            seller_id: Some(1),
            channel_item_id: format!("MLM{id}"),
            id_source: IdSource::Item,
            needs_enrichment,
            filtered_out,
            filtered_reasons: if filtered_out {
                vec![FilterReason::AccessoryOnly]
            } else {
                vec![]
            },
        })
        .expect("valid card")
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let stats = compute_batch_stats(&Vec::<ListingCard>::new());
        assert_eq!(stats, BatchStats::default());
        assert_eq!(stats.filtered_out(), 0);
    }

    #[test]
    fn mixed_batch_counts() {
        // 3 filtered (one of them needing enrichment), 7 valid of which 2
        // need enrichment.
        let mut cards = vec![
            make_card(0, true, true),
            make_card(1, true, false),
            make_card(2, true, false),
            make_card(3, false, true),
            make_card(4, false, true),
        ];
        cards.extend((5..10).map(|id| make_card(id, false, false)));

        let stats = compute_batch_stats(&cards);
        assert_eq!(
            stats,
            BatchStats {
                total: 10,
                valid: 7,
                needs_enrichment: 3,
                ready: 5,
            }
        );
        assert_eq!(stats.filtered_out(), 3);
    }

    #[test]
    fn order_does_not_matter() {
        let mut cards = vec![
            make_card(1, true, false),
            make_card(2, false, true),
            make_card(3, false, false),
        ];
        let forward = compute_batch_stats(&cards);
        cards.reverse();
        assert_eq!(forward, compute_batch_stats(&cards));
    }

    #[test]
    fn stats_serialize_with_plain_field_names() {
        let value = serde_json::to_value(BatchStats {
            total: 2,
            valid: 1,
            needs_enrichment: 1,
            ready: 0,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"total": 2, "valid": 1, "needs_enrichment": 1, "ready": 0})
        );
    }

    #[test]
    fn filtered_out_saturates_on_inconsistent_counts() {
        let stats: BatchStats =
            serde_json::from_str(r#"{"total":0,"valid":1,"needs_enrichment":0,"ready":0}"#)
                .unwrap();
        assert_eq!(stats.filtered_out(), 0);
    }
}
