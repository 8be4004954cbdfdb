//! Domain types and configuration shared by the mlinv crates.
//!
//! Scraped input ([`RawListingFragment`]), classified output ([`ListingCard`]),
//! the filter toggles ([`FilterConfig`]) and the keyword [`Vocabulary`] live
//! here so the classifier and the CLI agree on one model.

pub mod app_config;
pub mod card;
pub mod config;
pub mod listing;
pub mod vocabulary;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, FilterConfig};
pub use card::{CardFields, FilterReason, IdSource, ListingCard};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{PageSourceType, RawListingFragment, RawPrice, SourcedFragment};
pub use vocabulary::{load_vocabulary, Vocabulary, VocabularyLists};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("filter configuration is missing required toggle `{0}`")]
    MissingToggle(&'static str),

    #[error("failed to read vocabulary file {path}: {source}")]
    VocabularyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary file: {0}")]
    VocabularyFileParse(#[source] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Broken card invariants. These indicate a bug in the assembling code, never
/// bad scraped data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("card for {permalink:?} has an empty channel_item_id")]
    EmptyChannelItemId { permalink: String },

    #[error(
        "card for {permalink:?} has filtered_out={filtered_out} but {reason_count} filtered reasons"
    )]
    ReasonMismatch {
        permalink: String,
        filtered_out: bool,
        reason_count: usize,
    },
}
