//! Lending configuration
//!
//! The loan policy is read from an optional TOML file:
//!
//! ```toml
//! [loans]
//! fine_per_day = 10.0
//! max_history = 100
//! ```
//!
//! Missing tables and keys fall back to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fine charged for each day an item is kept past its due date
pub const DEFAULT_FINE_PER_DAY: f64 = 10.0;

/// Number of transitions the catalog remembers
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Top-level configuration file layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lending rules
    #[serde(default)]
    pub loans: LoanPolicy,
}

/// Rules applied by the borrow/return state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanPolicy {
    /// Fine per overdue day
    #[serde(default = "default_fine_per_day")]
    pub fine_per_day: f64,
    /// Maximum transition history entries to keep
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

/// Serde default for [`LoanPolicy::fine_per_day`]
const fn default_fine_per_day() -> f64 {
    DEFAULT_FINE_PER_DAY
}

/// Serde default for [`LoanPolicy::max_history`]
const fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self { fine_per_day: default_fine_per_day(), max_history: default_max_history() }
    }
}

impl LoanPolicy {
    /// Same policy with a different daily fine
    #[must_use]
    pub const fn with_fine_per_day(mut self, fine_per_day: f64) -> Self {
        self.fine_per_day = fine_per_day;
        self
    }

    /// Same policy with a different history bound
    #[must_use]
    pub const fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }
}

impl Config {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns the TOML parser error if `content` does not match the layout.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are not a valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::expect_used)]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").expect("empty config parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.loans.max_history, DEFAULT_MAX_HISTORY);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn partial_loans_table_keeps_other_defaults() {
        let loans = Config::from_toml_str("[loans]\nmax_history = 5\n").expect("partial config parses").loans;
        assert_eq!(loans, LoanPolicy::default().with_max_history(5));
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        assert!(Config::from_toml_str("[loans]\nfine_per_day = \"ten\"\n").is_err());
    }
}
