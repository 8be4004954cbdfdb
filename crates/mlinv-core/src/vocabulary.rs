//! Keyword vocabularies for the listing filter rules.
//!
//! The built-in lists are the business policy in force. A YAML file can
//! replace them wholesale (see [`load_vocabulary`]); extending a list, for
//! example adding `"incluye regalo"` to the bundle phrases, is a policy
//! change and belongs in that file rather than in code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const REFURBISHED_KEYWORDS: &[&str] = &["reacondicionado"];

/// A standalone `"regalo"` is intentionally absent: it matches too many
/// ordinary listings ("ideal para regalo").
pub const BUNDLE_KEYWORDS: &[&str] = &["de regalo", "+ airpods"];

pub const LOCKED_KEYWORDS: &[&str] = &["at&t", "telcel", "solo at&t"];

pub const ACCESSORY_KEYWORDS: &[&str] = &["funda", "case", "mica", "protector", "cargador"];

/// Keyword lists as written by a caller or a vocabulary file, before
/// normalization. Convert with [`Vocabulary::try_from`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularyLists {
    pub refurbished: Vec<String>,
    pub bundle: Vec<String>,
    pub locked: Vec<String>,
    pub accessory: Vec<String>,
}

/// Lowercase substrings that trigger each keyword rule.
///
/// Every keyword is trimmed and lowercased on construction, so matching
/// stays a plain substring test against lowercased text however the
/// vocabulary was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyLists")]
pub struct Vocabulary {
    refurbished: Vec<String>,
    bundle: Vec<String>,
    locked: Vec<String>,
    accessory: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            refurbished: owned(REFURBISHED_KEYWORDS),
            bundle: owned(BUNDLE_KEYWORDS),
            locked: owned(LOCKED_KEYWORDS),
            accessory: owned(ACCESSORY_KEYWORDS),
        }
    }
}

impl TryFrom<VocabularyLists> for Vocabulary {
    type Error = ConfigError;

    fn try_from(lists: VocabularyLists) -> Result<Self, Self::Error> {
        Ok(Self {
            refurbished: normalize("refurbished", lists.refurbished)?,
            bundle: normalize("bundle", lists.bundle)?,
            locked: normalize("locked", lists.locked)?,
            accessory: normalize("accessory", lists.accessory)?,
        })
    }
}

impl Vocabulary {
    #[must_use]
    pub fn refurbished(&self) -> &[String] {
        &self.refurbished
    }

    #[must_use]
    pub fn bundle(&self) -> &[String] {
        &self.bundle
    }

    #[must_use]
    pub fn locked(&self) -> &[String] {
        &self.locked
    }

    #[must_use]
    pub fn accessory(&self) -> &[String] {
        &self.accessory
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn normalize(name: &str, words: Vec<String>) -> Result<Vec<String>, ConfigError> {
    if words.is_empty() {
        return Err(ConfigError::Validation(format!(
            "vocabulary list '{name}' must contain at least one keyword"
        )));
    }
    words
        .into_iter()
        .map(|word| {
            let normalized = word.trim().to_lowercase();
            if normalized.is_empty() {
                Err(ConfigError::Validation(format!(
                    "vocabulary list '{name}' contains a blank keyword"
                )))
            } else {
                Ok(normalized)
            }
        })
        .collect()
}

/// Load and validate a vocabulary from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VocabularyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_vocabulary(&content)
}

fn parse_vocabulary(content: &str) -> Result<Vocabulary, ConfigError> {
    let lists: VocabularyLists =
        serde_yaml::from_str(content).map_err(ConfigError::VocabularyFileParse)?;
    Vocabulary::try_from(lists)
}
