//! Listing classification engine.
//!
//! Turns scraped [`RawListingFragment`]s into [`ListingCard`]s by running a
//! fixed pipeline per fragment: identity extraction, channel-item resolution,
//! filtering, enrichment, assembly. [`compute_batch_stats`] summarizes the
//! result. Everything here is pure and synchronous.
//!
//! [`RawListingFragment`]: mlinv_core::RawListingFragment
//! [`ListingCard`]: mlinv_core::ListingCard

pub mod assemble;
pub mod batch;
pub mod enrichment;
pub mod error;
pub mod filter;
pub mod identity;
pub mod stats;

pub use assemble::{assemble_card, CardAssembler};
pub use batch::{classify_batch, BatchOutcome};
pub use enrichment::needs_enrichment;
pub use error::ClassifierError;
pub use filter::{FilterClassifier, FilterOutcome};
pub use identity::{extract_ids, resolve_channel_item_id, ExtractedIds};
pub use stats::{compute_batch_stats, BatchStats};
