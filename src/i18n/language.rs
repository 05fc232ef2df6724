//! Language type: validated language representation.
//!
//! A `Language` can only be built from a code known to the registry, so every
//! string table and title lookup keyed by it is guaranteed to resolve.

use crate::i18n::strings::{LanguageStrings, ENGLISH_STRINGS, FRENCH_STRINGS, RUSSIAN_STRINGS};
use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageRole};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "fr", "en", "ru")
    code: &'static str,
}

impl Language {
    pub const FRENCH: Language = Language { code: "fr" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const RUSSIAN: Language = Language { code: "ru" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The fixed language shown in parentheses after every label.
    pub fn subtitle() -> Language {
        Language {
            code: LanguageRegistry::get().subtitle().code,
        }
    }

    /// Every enabled language, in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for a Language built via `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this language takes part in the daily rotation.
    pub fn is_primary(&self) -> bool {
        self.config().role == LanguageRole::Primary
    }

    /// The string table for this language.
    ///
    /// # Panics
    /// Panics for a registry language without a string table.
    pub fn strings(&self) -> &'static LanguageStrings {
        match self.code {
            "en" => &ENGLISH_STRINGS,
            "fr" => &FRENCH_STRINGS,
            "ru" => &RUSSIAN_STRINGS,
            other => panic!("No string table for language '{}'", other),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
