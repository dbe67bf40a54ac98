use crate::utils::error::{LcpError, Result};
use crate::utils::validation::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Cadence-word table for the frequency normalizer: phrase -> occurrences
/// per year. Built once per request and passed into the normalizer, so
/// per-client overrides never touch global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyConfig {
    /// Sorted longest-phrase-first so containment matching is deterministic.
    cadences: Vec<(String, Decimal)>,
}

#[derive(Debug, Deserialize)]
struct FrequencyConfigFile {
    cadences: HashMap<String, Decimal>,
}

fn default_cadences() -> Vec<(&'static str, u32)> {
    vec![
        ("monthly", 12),
        ("quarterly", 4),
        ("yearly", 1),
        ("annually", 1),
        ("weekly", 52),
        ("biweekly", 26),
        ("daily", 365),
    ]
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        let cadences = default_cadences()
            .into_iter()
            .map(|(phrase, per_year)| (phrase.to_string(), Decimal::from(per_year)))
            .collect();
        Self::from_entries(cadences)
    }
}

impl FrequencyConfig {
    fn from_entries(mut cadences: Vec<(String, Decimal)>) -> Self {
        cadences.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(&b.0)));
        Self { cadences }
    }

    /// Built-in cadences with file entries layered on top. A file entry for
    /// an existing phrase replaces the default value.
    pub fn with_overrides(overrides: HashMap<String, Decimal>) -> Self {
        let mut merged: HashMap<String, Decimal> = default_cadences()
            .into_iter()
            .map(|(phrase, per_year)| (phrase.to_string(), Decimal::from(per_year)))
            .collect();
        for (phrase, per_year) in overrides {
            merged.insert(phrase.trim().to_lowercase(), per_year);
        }
        Self::from_entries(merged.into_iter().collect())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LcpError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FrequencyConfigFile =
            toml::from_str(content).map_err(|e| LcpError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        let config = Self::with_overrides(file.cadences);
        config.validate()?;
        Ok(config)
    }

    /// First cadence phrase contained in `text` (already lowercased by the
    /// normalizer); longest phrases win.
    pub fn match_cadence(&self, text: &str) -> Option<Decimal> {
        self.cadences
            .iter()
            .find(|(phrase, _)| text.contains(phrase.as_str()))
            .map(|(_, per_year)| *per_year)
    }

    pub fn len(&self) -> usize {
        self.cadences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cadences.is_empty()
    }
}

impl Validate for FrequencyConfig {
    fn validate(&self) -> Result<()> {
        for (phrase, per_year) in &self.cadences {
            if phrase.is_empty() {
                return Err(LcpError::InvalidConfigValueError {
                    field: "cadences".to_string(),
                    value: String::new(),
                    reason: "Cadence phrase cannot be empty".to_string(),
                });
            }
            if *per_year <= Decimal::ZERO {
                return Err(LcpError::InvalidConfigValueError {
                    field: format!("cadences.{}", phrase),
                    value: per_year.to_string(),
                    reason: "Occurrences per year must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}
