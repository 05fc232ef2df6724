/// Keys into the string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKey {
    Score,
    Time,
    Submit,
    CorrectAnswerIs,
    GoodJob,
    Timeout,
    RestDay,
}

/// All localized user-facing strings for a language
///
/// Strings are stored raw. HTML escaping happens in `render::to_html`.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Status Lines ====================
    /// Label in front of the score counter
    pub score: &'static str,

    /// Label in front of the remaining time
    pub time: &'static str,

    // ==================== Answer Form ====================
    /// Submit button caption
    pub submit: &'static str,

    // ==================== Feedback ====================
    /// Prefix of the correction shown after a wrong answer
    pub correct_answer_is: &'static str,

    /// Praise after a correct answer, also the end-of-day message
    pub good_job: &'static str,

    /// Shown when the activity time budget runs out
    pub timeout: &'static str,

    /// Shown on weekdays without scheduled activities
    pub rest_day: &'static str,
}

impl LanguageStrings {
    pub fn get(&self, key: StringKey) -> &'static str {
        match key {
            StringKey::Score => self.score,
            StringKey::Time => self.time,
            StringKey::Submit => self.submit,
            StringKey::CorrectAnswerIs => self.correct_answer_is,
            StringKey::GoodJob => self.good_job,
            StringKey::Timeout => self.timeout,
            StringKey::RestDay => self.rest_day,
        }
    }
}

// ==================== French Strings ====================

pub const FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    score: "Score",
    time: "Temps",
    submit: "Valider",
    correct_answer_is: "La bonne réponse est",
    good_job: "Bravo !",
    timeout: "Le temps est écoulé !",
    rest_day: "Pas d'activité aujourd'hui. Repose-toi !",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    score: "Score",
    time: "Time",
    submit: "Submit",
    correct_answer_is: "The correct answer is",
    good_job: "Good job!",
    timeout: "Time is up!",
    rest_day: "Nothing scheduled today. Take a rest!",
};

// ==================== Russian Strings ====================

/// Russian strings (subtitle language)
pub const RUSSIAN_STRINGS: LanguageStrings = LanguageStrings {
    score: "Счет",
    time: "Время",
    submit: "Ок",
    correct_answer_is: "Правильный ответ",
    good_job: "Молодец!",
    timeout: "Время вышло!",
    rest_day: "Нет заданий на сегодня. Отдыхай!",
};
