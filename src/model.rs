use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Arithmetic operator of a math quiz.
///
/// Accepts the symbol used in schedule files (`"+"`, `"**"`, ...) or its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+", alias = "add")]
    Add,
    #[serde(rename = "-", alias = "subtract")]
    Subtract,
    #[serde(rename = "*", alias = "multiply")]
    Multiply,
    #[serde(rename = "/", alias = "divide")]
    Divide,
    /// Square of the left operand; the right operand is always 2.
    #[serde(rename = "**", alias = "pow")]
    Power,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "**",
        }
    }

    /// Compute `left <op> right`.
    ///
    /// Operands come from the generator, which keeps divisions exact, divisors
    /// non-zero and exponents at 2.
    pub fn apply(&self, left: i64, right: i64) -> i64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.pow(right as u32),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parameters of one math quiz activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathQuizConfig {
    /// Number of questions in the batch (> 0)
    pub count: u32,
    pub operator: Operator,
    /// Upper bound for operands, and for the dividend of divisions (> 0)
    pub max_operand: u32,
}

/// What an activity does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    MathQuiz(MathQuizConfig),
}

/// Title of an activity, one entry per registered language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalizedTitle(BTreeMap<Language, String>);

impl LocalizedTitle {
    pub fn new(entries: impl IntoIterator<Item = (Language, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Title in `language`, or an empty string if none was provided.
    pub fn get(&self, language: Language) -> &str {
        self.0.get(&language).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, language: Language) -> bool {
        self.0.contains_key(&language)
    }
}

/// One scheduled activity. Immutable once the schedule is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityConfig {
    pub kind: ActivityKind,
    pub title: LocalizedTitle,
}

impl ActivityConfig {
    pub fn math_quiz(
        count: u32,
        operator: Operator,
        max_operand: u32,
        title: LocalizedTitle,
    ) -> Self {
        Self {
            kind: ActivityKind::MathQuiz(MathQuizConfig {
                count,
                operator,
                max_operand,
            }),
            title,
        }
    }
}

/// A single arithmetic question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub left: i64,
    pub operator: Operator,
    pub right: i64,
    /// Display text, e.g. `"24 / 4"`
    pub text: String,
    pub expected_answer: i64,
}

impl Question {
    pub fn new(left: i64, operator: Operator, right: i64) -> Self {
        Self {
            left,
            operator,
            right,
            text: format!("{} {} {}", left, operator, right),
            expected_answer: operator.apply(left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Operator Tests ====================

    #[test]
    fn test_apply_each_operator() {
        assert_eq!(Operator::Add.apply(3, 5), 8);
        assert_eq!(Operator::Subtract.apply(9, 4), 5);
        assert_eq!(Operator::Multiply.apply(7, 6), 42);
        assert_eq!(Operator::Divide.apply(24, 4), 6);
        assert_eq!(Operator::Power.apply(9, 2), 81);
    }

    #[test]
    fn test_operator_deserializes_from_symbol_and_name() {
        let symbol: Operator = serde_json::from_str("\"**\"").unwrap();
        let name: Operator = serde_json::from_str("\"divide\"").unwrap();
        assert_eq!(symbol, Operator::Power);
        assert_eq!(name, Operator::Divide);
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let result: Result<Operator, _> = serde_json::from_str("\"%\"");
        assert!(result.is_err());
    }

    // ==================== Question Tests ====================

    #[test]
    fn test_question_text_and_answer() {
        let question = Question::new(24, Operator::Divide, 4);
        assert_eq!(question.text, "24 / 4");
        assert_eq!(question.expected_answer, 6);
    }

    #[test]
    fn test_power_question_text() {
        let question = Question::new(7, Operator::Power, 2);
        assert_eq!(question.text, "7 ** 2");
        assert_eq!(question.expected_answer, 49);
    }

    // ==================== Title Tests ====================

    #[test]
    fn test_localized_title_lookup() {
        let title = LocalizedTitle::new([
            (Language::ENGLISH, "Additions".to_string()),
            (Language::RUSSIAN, "Сложение".to_string()),
        ]);

        assert_eq!(title.get(Language::ENGLISH), "Additions");
        assert!(title.contains(Language::RUSSIAN));
        assert_eq!(title.get(Language::FRENCH), "");
    }
}
