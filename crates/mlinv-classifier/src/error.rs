use mlinv_core::CoreError;
use thiserror::Error;

/// Defects raised while classifying. Malformed scraped data never lands
/// here; it becomes a filter reason on the card instead.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("card invariant violated: {0}")]
    Invariant(#[from] CoreError),

    #[error("card assembly failed for fragment {index} of the batch: {source}")]
    Batch {
        index: usize,
        #[source]
        source: CoreError,
    },
}
