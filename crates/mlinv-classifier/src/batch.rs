use mlinv_core::{ListingCard, SourcedFragment};
use rayon::prelude::*;

use crate::assemble::CardAssembler;
use crate::error::ClassifierError;
use crate::stats::{compute_batch_stats, BatchStats};

/// Cards for a batch, in input order, plus their summary.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub cards: Vec<ListingCard>,
    pub stats: BatchStats,
}

/// Classify every fragment in `fragments`.
///
/// With `parallel` set, fragments are spread over the rayon pool. Fragments
/// share nothing, so the cards are identical to a sequential run.
///
/// # Errors
///
/// Returns [`ClassifierError::Batch`] for the first fragment whose card broke
/// an invariant.
pub fn classify_batch(
    fragments: &[SourcedFragment],
    assembler: &CardAssembler<'_>,
    parallel: bool,
) -> Result<BatchOutcome, ClassifierError> {
    let classify = |(index, sourced): (usize, &SourcedFragment)| {
        assembler
            .build(&sourced.fragment, sourced.source_type)
            .map_err(|source| ClassifierError::Batch { index, source })
    };

    let cards = if parallel {
        fragments
            .par_iter()
            .enumerate()
            .map(classify)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        fragments
            .iter()
            .enumerate()
            .map(classify)
            .collect::<Result<Vec<_>, _>>()?
    };

    let stats = compute_batch_stats(&cards);
    tracing::info!(
        total = stats.total,
        valid = stats.valid,
        needs_enrichment = stats.needs_enrichment,
        ready = stats.ready,
        parallel,
        "classified listing batch"
    );

    Ok(BatchOutcome { cards, stats })
}
