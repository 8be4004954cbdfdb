use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The three business toggles a caller supplies per run.
///
/// No field has a serde default: a document that omits a toggle fails to
/// deserialize instead of silently filtering with a guessed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    pub allow_refurbished: bool,
    pub allow_bundles: bool,
    pub allow_locked: bool,
}

impl FilterConfig {
    /// Build a config from individually sourced toggles.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToggle`] naming the first absent toggle.
    pub fn from_toggles(
        allow_refurbished: Option<bool>,
        allow_bundles: Option<bool>,
        allow_locked: Option<bool>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            allow_refurbished: allow_refurbished
                .ok_or(ConfigError::MissingToggle("allow_refurbished"))?,
            allow_bundles: allow_bundles.ok_or(ConfigError::MissingToggle("allow_bundles"))?,
            allow_locked: allow_locked.ok_or(ConfigError::MissingToggle("allow_locked"))?,
        })
    }

    /// Every exclusion rule active.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            allow_refurbished: false,
            allow_bundles: false,
            allow_locked: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub filter: FilterConfig,
    /// Optional YAML file replacing the built-in keyword vocabulary.
    pub vocabulary_path: Option<PathBuf>,
    /// Classify batches on the rayon pool instead of sequentially.
    pub batch_parallel: bool,
}
