//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of all languages the activity
//! runner can display. It uses a singleton pattern with `OnceLock` to ensure
//! thread-safe initialization and access.

use std::sync::OnceLock;

/// How a language takes part in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    /// Takes turns as the main display language, one day each.
    Primary,
    /// Shown in parentheses after every primary-language label.
    Subtitle,
}

/// Configuration for a supported language.
///
/// Contains all metadata for a specific language, including its code,
/// names, role and enabled status.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "fr", "en", "ru")
    pub code: &'static str,

    /// English name of the language (e.g., "French", "Russian")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français", "Русский")
    pub native_name: &'static str,

    /// Whether the language rotates as primary or is the fixed subtitle
    pub role: LanguageRole,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
///
/// Initialized once on first access and immutable thereafter. The order of
/// primary languages defines the daily rotation order.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Enabled primary languages, in rotation order.
    pub fn rotation(&self) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.enabled && lang.role == LanguageRole::Primary)
            .collect()
    }

    /// Get the subtitle language configuration.
    ///
    /// # Panics
    /// Panics if no subtitle language or more than one is defined
    /// (this indicates a configuration error in `default_languages`).
    pub fn subtitle(&self) -> &LanguageConfig {
        let subtitles: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.enabled && lang.role == LanguageRole::Subtitle)
            .collect();

        match subtitles.len() {
            0 => panic!("No subtitle language found in registry"),
            1 => subtitles[0],
            _ => panic!("Multiple subtitle languages found in registry"),
        }
    }
}

/// Default language configurations.
///
/// French and English alternate day by day; Russian is always the subtitle.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            role: LanguageRole::Primary,
            enabled: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            role: LanguageRole::Primary,
            enabled: true,
        },
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            role: LanguageRole::Subtitle,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_russian() {
        let config = LanguageRegistry::get()
            .get_by_code("ru")
            .expect("Russian should be registered");

        assert_eq!(config.name, "Russian");
        assert_eq!(config.native_name, "Русский");
        assert_eq!(config.role, LanguageRole::Subtitle);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("es").is_none());
    }

    #[test]
    fn test_rotation_is_french_then_english() {
        let codes: Vec<_> = LanguageRegistry::get()
            .rotation()
            .iter()
            .map(|lang| lang.code)
            .collect();

        assert_eq!(codes, vec!["fr", "en"]);
    }

    #[test]
    fn test_subtitle_is_russian() {
        assert_eq!(LanguageRegistry::get().subtitle().code, "ru");
    }

    #[test]
    fn test_list_enabled_contains_all_three() {
        let enabled = LanguageRegistry::get().list_enabled();
        assert_eq!(enabled.len(), 3);
    }
}
