use crate::i18n::Language;
use crate::model::{ActivityConfig, ActivityKind, LocalizedTitle, Operator};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Largest accepted `max_val`. Keeps products and squares well inside `i64`.
pub const MAX_OPERAND_LIMIT: u32 = 1_000_000;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schedule: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weekday key '{0}' is not a number in 0..=6")]
    InvalidWeekday(String),

    #[error("weekday {weekday}, activity {index}: question count must be greater than 0")]
    ZeroCount { weekday: u8, index: usize },

    #[error("weekday {weekday}, activity {index}: max_val must be greater than 0")]
    ZeroMaxOperand { weekday: u8, index: usize },

    #[error("weekday {weekday}, activity {index}: max_val {value} exceeds {limit}")]
    MaxOperandTooLarge {
        weekday: u8,
        index: usize,
        value: u32,
        limit: u32,
    },

    #[error("weekday {weekday}, activity {index}: unknown title language '{code}'")]
    UnknownLanguage {
        weekday: u8,
        index: usize,
        code: String,
    },

    #[error("weekday {weekday}, activity {index}: missing title for '{language}'")]
    MissingTitle {
        weekday: u8,
        index: usize,
        language: Language,
    },
}

/// Activity as written in a schedule file.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawActivity {
    MathQuiz {
        count: u32,
        operator: Operator,
        #[serde(alias = "max_operand")]
        max_val: u32,
        title: BTreeMap<String, String>,
    },
}

/// Weekly table of activities. Index 0 is Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    days: [Vec<ActivityConfig>; 7],
}

/// Weekday index of `date`, Sunday = 0.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

fn title(en: &str, fr: &str, ru: &str) -> LocalizedTitle {
    LocalizedTitle::new([
        (Language::ENGLISH, en.to_string()),
        (Language::FRENCH, fr.to_string()),
        (Language::RUSSIAN, ru.to_string()),
    ])
}

impl Schedule {
    /// The built-in weekly program: one ten-question quiz per day.
    pub fn weekly_default() -> Self {
        let quiz = ActivityConfig::math_quiz;
        Self {
            days: [
                vec![quiz(
                    10,
                    Operator::Power,
                    10,
                    title(
                        "Multiplication by itself",
                        "Multiplications par lui-même",
                        "Умножение на себя",
                    ),
                )],
                vec![quiz(
                    10,
                    Operator::Add,
                    9,
                    title(
                        "1-digit additions",
                        "Additions à 1 chiffre",
                        "Сложение однозначных чисел",
                    ),
                )],
                vec![quiz(
                    10,
                    Operator::Multiply,
                    10,
                    title(
                        "Single-digit multiplications",
                        "Multiplications à 1 chiffre",
                        "Умножение на однозначное число",
                    ),
                )],
                vec![quiz(
                    10,
                    Operator::Divide,
                    100,
                    title(
                        "1-digit divisions",
                        "Divisions à 1 chiffre",
                        "Деление на 1 цифру",
                    ),
                )],
                vec![quiz(
                    10,
                    Operator::Add,
                    10,
                    title(
                        "2-digit additions",
                        "Additions à 2 chiffres",
                        "Сложение двухзначных чисел",
                    ),
                )],
                vec![quiz(
                    10,
                    Operator::Multiply,
                    10,
                    title(
                        "2-digit multiplications",
                        "Multiplications à 2 chiffres",
                        "Умножение двухзначных чисел",
                    ),
                )],
                vec![quiz(
                    10,
                    Operator::Divide,
                    100,
                    title(
                        "2-digit divisions",
                        "Divisions à 2 chiffres",
                        "2-значные деления",
                    ),
                )],
            ],
        }
    }

    /// Build a schedule from activities indexed by weekday (0 = Sunday).
    pub fn from_days(days: [Vec<ActivityConfig>; 7]) -> Result<Self, ScheduleError> {
        let schedule = Self { days };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Parse and validate a JSON schedule.
    ///
    /// The document is an object keyed by weekday (`"0"` = Sunday). Missing
    /// weekdays are rest days.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let raw: BTreeMap<String, Vec<RawActivity>> = serde_json::from_str(json)?;
        let mut schedule = Schedule::default();

        for (key, activities) in raw {
            let weekday = key
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|day| *day < 7)
                .ok_or_else(|| ScheduleError::InvalidWeekday(key.clone()))?;

            for (index, raw_activity) in activities.into_iter().enumerate() {
                let activity = convert(weekday, index, raw_activity)?;
                validate_activity(weekday, index, &activity)?;
                schedule.days[weekday as usize].push(activity);
            }
        }

        debug!(
            "Parsed schedule with {} activities",
            schedule.days.iter().map(Vec::len).sum::<usize>()
        );
        Ok(schedule)
    }

    /// Read a schedule file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let schedule = Self::from_json_str(&json)?;
        info!("Loaded schedule from {}", path.display());
        Ok(schedule)
    }

    /// Activities for a weekday (0 = Sunday). Out-of-range weekdays have none.
    pub fn activities_for(&self, weekday: u8) -> &[ActivityConfig] {
        self.days
            .get(weekday as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn for_date(&self, date: NaiveDate) -> &[ActivityConfig] {
        self.activities_for(weekday_index(date))
    }

    /// Check every activity, e.g. after building a schedule in code.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for (weekday, activities) in self.days.iter().enumerate() {
            for (index, activity) in activities.iter().enumerate() {
                validate_activity(weekday as u8, index, activity)?;
            }
        }
        Ok(())
    }
}

fn convert(weekday: u8, index: usize, raw: RawActivity) -> Result<ActivityConfig, ScheduleError> {
    match raw {
        RawActivity::MathQuiz {
            count,
            operator,
            max_val,
            title,
        } => {
            let mut entries = Vec::with_capacity(title.len());
            for (code, text) in title {
                let language =
                    Language::from_code(&code).map_err(|_| ScheduleError::UnknownLanguage {
                        weekday,
                        index,
                        code: code.clone(),
                    })?;
                entries.push((language, text));
            }
            Ok(ActivityConfig::math_quiz(
                count,
                operator,
                max_val,
                LocalizedTitle::new(entries),
            ))
        }
    }
}

fn validate_activity(
    weekday: u8,
    index: usize,
    activity: &ActivityConfig,
) -> Result<(), ScheduleError> {
    match &activity.kind {
        ActivityKind::MathQuiz(quiz) => {
            if quiz.count == 0 {
                return Err(ScheduleError::ZeroCount { weekday, index });
            }
            if quiz.max_operand == 0 {
                return Err(ScheduleError::ZeroMaxOperand { weekday, index });
            }
            if quiz.max_operand > MAX_OPERAND_LIMIT {
                return Err(ScheduleError::MaxOperandTooLarge {
                    weekday,
                    index,
                    value: quiz.max_operand,
                    limit: MAX_OPERAND_LIMIT,
                });
            }
        }
    }

    if let Some(language) = Language::all()
        .into_iter()
        .find(|language| !activity.title.contains(*language))
    {
        return Err(ScheduleError::MissingTitle {
            weekday,
            index,
            language,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_JSON: &str = r#"{
        "1": [
            {
                "type": "math_quiz",
                "count": 5,
                "operator": "-",
                "max_val": 20,
                "title": { "en": "Subtractions", "fr": "Soustractions", "ru": "Вычитание" }
            }
        ]
    }"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== Default Schedule Tests ====================

    #[test]
    fn test_default_schedule_is_valid() {
        Schedule::weekly_default().validate().expect("default should validate");
    }

    #[test]
    fn test_default_schedule_has_one_quiz_per_day() {
        let schedule = Schedule::weekly_default();
        for weekday in 0..7 {
            assert_eq!(schedule.activities_for(weekday).len(), 1);
        }
    }

    #[test]
    fn test_default_wednesday_is_division() {
        let schedule = Schedule::weekly_default();
        match &schedule.activities_for(3)[0].kind {
            ActivityKind::MathQuiz(quiz) => {
                assert_eq!(quiz.operator, Operator::Divide);
                assert_eq!(quiz.max_operand, 100);
            }
        }
    }

    #[test]
    fn test_for_date_uses_sunday_as_zero() {
        let schedule = Schedule::weekly_default();
        // 2025-01-05 is a Sunday
        assert_eq!(weekday_index(date(2025, 1, 5)), 0);
        assert_eq!(
            schedule.for_date(date(2025, 1, 5)),
            schedule.activities_for(0)
        );
    }

    #[test]
    fn test_out_of_range_weekday_is_empty() {
        assert!(Schedule::weekly_default().activities_for(7).is_empty());
    }

    // ==================== JSON Loading Tests ====================

    #[test]
    fn test_from_json_str_valid() {
        let schedule = Schedule::from_json_str(VALID_JSON).expect("should parse");

        assert!(schedule.activities_for(0).is_empty());
        let monday = schedule.activities_for(1);
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].title.get(Language::FRENCH), "Soustractions");
    }

    #[test]
    fn test_unknown_operator_fails_fast() {
        let json = VALID_JSON.replace("\"-\"", "\"%\"");
        let err = Schedule::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }

    #[test]
    fn test_unknown_activity_type_fails() {
        let json = VALID_JSON.replace("math_quiz", "word_search");
        assert!(matches!(
            Schedule::from_json_str(&json),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_weekday_key() {
        let json = VALID_JSON.replace("\"1\"", "\"7\"");
        assert!(matches!(
            Schedule::from_json_str(&json),
            Err(ScheduleError::InvalidWeekday(key)) if key == "7"
        ));
    }

    #[test]
    fn test_zero_count_rejected() {
        let json = VALID_JSON.replace("\"count\": 5", "\"count\": 0");
        assert!(matches!(
            Schedule::from_json_str(&json),
            Err(ScheduleError::ZeroCount { weekday: 1, index: 0 })
        ));
    }

    #[test]
    fn test_zero_max_val_rejected() {
        let json = VALID_JSON.replace("\"max_val\": 20", "\"max_val\": 0");
        assert!(matches!(
            Schedule::from_json_str(&json),
            Err(ScheduleError::ZeroMaxOperand { .. })
        ));
    }

    #[test]
    fn test_huge_max_val_rejected() {
        let json = VALID_JSON.replace("\"max_val\": 20", "\"max_val\": 2000000");
        assert!(matches!(
            Schedule::from_json_str(&json),
            Err(ScheduleError::MaxOperandTooLarge { value: 2_000_000, .. })
        ));
    }

    #[test]
    fn test_max_operand_alias_accepted() {
        let json = VALID_JSON.replace("max_val", "max_operand");
        assert!(Schedule::from_json_str(&json).is_ok());
    }

    #[test]
    fn test_missing_title_language_rejected() {
        let json = VALID_JSON.replace(", \"ru\": \"Вычитание\"", "");
        assert!(matches!(
            Schedule::from_json_str(&json),
            Err(ScheduleError::MissingTitle { language, .. }) if language == Language::RUSSIAN
        ));
    }

    #[test]
    fn test_unknown_title_language_rejected() {
        let json = VALID_JSON.replace("\"ru\"", "\"es\"");
        assert!(matches!(
            Schedule::from_json_str(&json),
            Err(ScheduleError::UnknownLanguage { code, .. }) if code == "es"
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(VALID_JSON.as_bytes()).unwrap();

        let schedule = Schedule::from_file(file.path()).expect("should load");
        assert_eq!(schedule.activities_for(1).len(), 1);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Schedule::from_file("/nonexistent/schedule.json").unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/schedule.json"));
    }
}
