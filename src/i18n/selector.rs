//! Daily language rotation.

use crate::i18n::{Language, LanguageRegistry};
use chrono::NaiveDate;

/// Day zero of the rotation: 2025-01-01.
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("2025-01-01 is a valid date")
}

/// Pick the primary language for `date`.
///
/// Primary languages take turns one day each, in registry order, counted
/// from `epoch`. Dates before the epoch keep alternating (Euclidean remainder).
pub fn select_language(date: NaiveDate, epoch: NaiveDate) -> Language {
    let rotation = LanguageRegistry::get().rotation();
    if rotation.is_empty() {
        return Language::ENGLISH;
    }

    let days = date.signed_duration_since(epoch).num_days();
    let slot = days.rem_euclid(rotation.len() as i64) as usize;

    Language::from_code(rotation[slot].code).unwrap_or(Language::ENGLISH)
}
