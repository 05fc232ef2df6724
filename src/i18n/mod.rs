//! Internationalization (i18n) module.
//!
//! All language-related logic and localized strings live here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their roles
//! - `language`: Type-safe `Language` validated against the registry
//! - `strings`: Static string tables, one per language
//! - `selector`: Daily rotation of the primary language
//!
//! # Example
//!
//! ```rust,ignore
//! use daily_activity::i18n::{bilingual, default_epoch, select_language, StringKey};
//!
//! let language = select_language(today, default_epoch());
//! let label = bilingual(StringKey::Score, language); // "Score (Счет)"
//! ```

mod language;
mod registry;
mod selector;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry, LanguageRole};
pub use selector::{default_epoch, select_language};
pub use strings::{LanguageStrings, StringKey};

/// Look up a string for `language`.
pub fn lookup(key: StringKey, language: Language) -> &'static str {
    language.strings().get(key)
}

/// Render a label as `"<primary> (<subtitle>)"`.
///
/// When the primary language is the subtitle language itself, the text is
/// shown once.
pub fn bilingual(key: StringKey, primary: Language) -> String {
    let subtitle = Language::subtitle();
    if primary == subtitle {
        return lookup(key, primary).to_string();
    }
    format!("{} ({})", lookup(key, primary), lookup(key, subtitle))
}
