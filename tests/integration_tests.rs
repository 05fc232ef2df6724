//! Integration tests for the daily activity runner
//!
//! These tests drive whole days through the public API: schedule, language
//! rotation, quiz engine, runner and rendering together. The tokio clock is
//! paused, so countdowns and feedback pauses complete instantly.

use chrono::NaiveDate;
use daily_activity::app::{run_day, DayOutcome};
use daily_activity::config::Config;
use daily_activity::host::StandaloneHost;
use daily_activity::i18n::Language;
use daily_activity::input::{AnswerSource, ChannelAnswers, ScriptedAnswers};
use daily_activity::model::{ActivityConfig, LocalizedTitle, Operator, Question};
use daily_activity::quiz::QuizOutcome;
use daily_activity::render::RenderInstruction;
use daily_activity::schedule::Schedule;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

// ==================== Test Helpers ====================

/// 2025-01-01: Wednesday (weekday 3), French day
fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// 2025-01-02: Thursday (weekday 4), English day
fn thursday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
}

fn fast_config() -> Config {
    Config {
        feedback_delay_ms: 10,
        ..Config::default()
    }
}

fn title(en: &str) -> LocalizedTitle {
    LocalizedTitle::new([
        (Language::ENGLISH, en.to_string()),
        (Language::FRENCH, format!("{} FR", en)),
        (Language::RUSSIAN, format!("{} RU", en)),
    ])
}

/// Schedule with the given activities on every weekday.
fn every_day(activities: Vec<ActivityConfig>) -> Schedule {
    Schedule::from_days(std::array::from_fn(|_| activities.clone())).expect("valid schedule")
}

/// Answers each question with a fixed wrong value first, then correctly.
#[derive(Default)]
struct LearnsFromMistakes {
    asked: Vec<Question>,
}

impl AnswerSource for LearnsFromMistakes {
    async fn next_answer(&mut self, question: &Question) -> Option<String> {
        let first_time = !self.asked.contains(question);
        self.asked.push(question.clone());
        if first_time {
            Some((question.expected_answer + 1).to_string())
        } else {
            Some(question.expected_answer.to_string())
        }
    }
}

/// Answers everything correctly.
struct Oracle;

impl AnswerSource for Oracle {
    async fn next_answer(&mut self, question: &Question) -> Option<String> {
        Some(question.expected_answer.to_string())
    }
}

/// Never answers.
struct Silent;

impl AnswerSource for Silent {
    fn next_answer(&mut self, _question: &Question) -> impl Future<Output = Option<String>> {
        std::future::pending()
    }
}

fn feedback(out: &[RenderInstruction]) -> Vec<(bool, Option<String>)> {
    out.iter()
        .filter_map(|i| match i {
            RenderInstruction::Feedback {
                correct, detail, ..
            } => Some((*correct, detail.clone())),
            _ => None,
        })
        .collect()
}

fn count_questions(out: &[RenderInstruction]) -> usize {
    out.iter()
        .filter(|i| matches!(i, RenderInstruction::Question { .. }))
        .count()
}

// ==================== Scenario Tests ====================

#[tokio::test(start_paused = true)]
async fn test_single_addition_answered_correctly() {
    let schedule = every_day(vec![ActivityConfig::math_quiz(
        1,
        Operator::Add,
        9,
        title("Additions"),
    )]);
    let mut out: Vec<RenderInstruction> = Vec::new();

    let outcome = run_day(
        &fast_config(),
        &schedule,
        thursday(),
        &mut StandaloneHost::default(),
        &mut out,
        Oracle,
        StdRng::seed_from_u64(42),
    )
    .await;

    let DayOutcome::Finished(completion) = outcome else {
        panic!("expected a finished day");
    };
    assert_eq!(
        completion.reports[0].outcome,
        QuizOutcome::Completed { score: 1, total: 1 }
    );
    assert!(out.contains(&RenderInstruction::Score {
        line: "Score (Счет): 1 / 1".to_string(),
        score: 1,
        total: 1,
    }));
    assert_eq!(
        out.last(),
        Some(&RenderInstruction::Message {
            text: "Good job! (Молодец!)".to_string()
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_wrong_division_is_corrected_and_requeued() {
    let schedule = every_day(vec![ActivityConfig::math_quiz(
        1,
        Operator::Divide,
        100,
        title("Divisions"),
    )]);
    let mut out: Vec<RenderInstruction> = Vec::new();
    let mut answers = LearnsFromMistakes::default();

    let outcome = run_day(
        &fast_config(),
        &schedule,
        wednesday(),
        &mut StandaloneHost::default(),
        &mut out,
        &mut answers,
        StdRng::seed_from_u64(7),
    )
    .await;

    let DayOutcome::Finished(completion) = outcome else {
        panic!("expected a finished day");
    };
    assert!(completion.all_completed());

    // Same question asked twice: once wrong, once right
    assert_eq!(answers.asked.len(), 2);
    assert_eq!(answers.asked[0], answers.asked[1]);
    assert_eq!(count_questions(&out), 2);

    let question = &answers.asked[0];
    assert_eq!(question.left, question.right * question.expected_answer);
    assert_eq!(
        feedback(&out),
        vec![
            (
                false,
                Some(format!("{} = {}", question.text, question.expected_answer))
            ),
            (true, None),
        ]
    );

    // French day: French label with Russian subtitle
    assert!(out.iter().any(|i| matches!(
        i,
        RenderInstruction::Feedback { label, correct: false, .. }
            if label == "La bonne réponse est (Правильный ответ)"
    )));
}

#[tokio::test(start_paused = true)]
async fn test_silent_user_times_out_then_day_ends() {
    let schedule = Schedule::weekly_default();
    let mut out: Vec<RenderInstruction> = Vec::new();

    let outcome = run_day(
        &fast_config(),
        &schedule,
        thursday(),
        &mut StandaloneHost::default(),
        &mut out,
        Silent,
        StdRng::seed_from_u64(1),
    )
    .await;

    let DayOutcome::Finished(completion) = outcome else {
        panic!("expected a finished day");
    };
    assert_eq!(
        completion.reports[0].outcome,
        QuizOutcome::TimedOut { score: 0, total: 10 }
    );

    assert_eq!(count_questions(&out), 1);
    let timers: Vec<u32> = out
        .iter()
        .filter_map(|i| match i {
            RenderInstruction::Timer {
                remaining_seconds, ..
            } => Some(*remaining_seconds),
            _ => None,
        })
        .collect();
    assert_eq!(timers.first(), Some(&300));
    assert_eq!(timers.last(), Some(&0));
    assert_eq!(timers.len(), 301);

    assert!(out.contains(&RenderInstruction::Message {
        text: "Time is up!".to_string()
    }));
}

#[tokio::test(start_paused = true)]
async fn test_runner_continues_after_timeout() {
    let schedule = every_day(vec![
        ActivityConfig::math_quiz(2, Operator::Add, 9, title("Warm-up")),
        ActivityConfig::math_quiz(2, Operator::Power, 10, title("Squares")),
    ]);
    let config = Config {
        quiz_time_limit_secs: 5,
        ..fast_config()
    };
    let mut out: Vec<RenderInstruction> = Vec::new();

    // Four answers, then the input closes: the second quiz can only time out
    let answers = ScriptedAnswers::new(["0", "0", "0", "0"]);
    let outcome = run_day(
        &config,
        &schedule,
        thursday(),
        &mut StandaloneHost::default(),
        &mut out,
        answers,
        StdRng::seed_from_u64(3),
    )
    .await;

    let DayOutcome::Finished(completion) = outcome else {
        panic!("expected a finished day");
    };
    assert_eq!(completion.reports.len(), 2);
    assert!(matches!(
        completion.reports[1].outcome,
        QuizOutcome::TimedOut { .. }
    ));

    let titles = out
        .iter()
        .filter(|i| matches!(i, RenderInstruction::Title { .. }))
        .count();
    assert_eq!(titles, 2);
}

#[tokio::test(start_paused = true)]
async fn test_early_lines_do_not_answer_the_next_activity() {
    // "1 / 1" is the only question a division quiz bounded by 1 can ask
    let schedule = every_day(vec![
        ActivityConfig::math_quiz(1, Operator::Divide, 1, title("First")),
        ActivityConfig::math_quiz(1, Operator::Divide, 1, title("Second")),
    ]);
    let config = Config {
        quiz_time_limit_secs: 2,
        ..Config::default()
    };
    let (sender, answers) = ChannelAnswers::channel(8);

    // Typed before anything is on screen
    sender.send("1".to_string()).await.unwrap();

    let user = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        sender.send("1".to_string()).await.unwrap();
        // Still inside the first activity's feedback pause
        tokio::time::sleep(Duration::from_millis(500)).await;
        sender.send("1".to_string()).await.unwrap();
        sender
    });

    let mut out: Vec<RenderInstruction> = Vec::new();
    let outcome = run_day(
        &config,
        &schedule,
        thursday(),
        &mut StandaloneHost::default(),
        &mut out,
        answers,
        StdRng::seed_from_u64(21),
    )
    .await;
    drop(user);

    let DayOutcome::Finished(completion) = outcome else {
        panic!("expected a finished day");
    };
    assert_eq!(
        completion.reports[0].outcome,
        QuizOutcome::Completed { score: 1, total: 1 }
    );
    assert_eq!(
        completion.reports[1].outcome,
        QuizOutcome::TimedOut { score: 0, total: 1 }
    );
    assert_eq!(feedback(&out), vec![(true, None)]);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_answers_are_wrong() {
    let schedule = every_day(vec![ActivityConfig::math_quiz(
        1,
        Operator::Multiply,
        10,
        title("Multiplications"),
    )]);
    let config = Config {
        quiz_time_limit_secs: 3,
        ..fast_config()
    };
    let mut out: Vec<RenderInstruction> = Vec::new();

    let outcome = run_day(
        &config,
        &schedule,
        thursday(),
        &mut StandaloneHost::default(),
        &mut out,
        ScriptedAnswers::new(["", "twelve", "3.0"]),
        StdRng::seed_from_u64(9),
    )
    .await;

    let DayOutcome::Finished(completion) = outcome else {
        panic!("expected a finished day");
    };
    assert_eq!(completion.total_score(), 0);
    assert!(feedback(&out).iter().all(|(correct, _)| !correct));
    assert_eq!(feedback(&out).len(), 3);
}

// ==================== Schedule File Tests ====================

#[tokio::test(start_paused = true)]
async fn test_schedule_file_with_rest_day() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "3": [{{
                "type": "math_quiz",
                "count": 2,
                "operator": "-",
                "max_val": 20,
                "title": {{ "en": "Subtractions", "fr": "Soustractions", "ru": "Вычитание" }}
            }}]
        }}"#
    )
    .unwrap();

    let config = Config {
        schedule_file: Some(file.path().display().to_string()),
        ..fast_config()
    };
    let schedule = config.load_schedule().expect("schedule should load");

    // Thursday has nothing scheduled
    let mut out: Vec<RenderInstruction> = Vec::new();
    let rest = run_day(
        &config,
        &schedule,
        thursday(),
        &mut StandaloneHost::default(),
        &mut out,
        Oracle,
        StdRng::seed_from_u64(0),
    )
    .await;
    assert_eq!(rest, DayOutcome::RestDay);
    assert_eq!(count_questions(&out), 0);

    // Wednesday runs the subtraction quiz with French titles
    let mut out: Vec<RenderInstruction> = Vec::new();
    let day = run_day(
        &config,
        &schedule,
        wednesday(),
        &mut StandaloneHost::default(),
        &mut out,
        Oracle,
        StdRng::seed_from_u64(0),
    )
    .await;
    assert!(matches!(day, DayOutcome::Finished(ref c) if c.all_completed()));
    assert!(out.contains(&RenderInstruction::Title {
        primary: "Soustractions".to_string(),
        subtitle: "Вычитание".to_string(),
    }));
}

#[test]
fn test_schedule_file_with_unknown_operator_fails_fast() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "0": [{{ "type": "math_quiz", "count": 1, "operator": "%", "max_val": 9,
              "title": {{ "en": "x", "fr": "x", "ru": "x" }} }}] }}"#
    )
    .unwrap();

    let config = Config {
        schedule_file: Some(file.path().display().to_string()),
        ..Config::default()
    };
    assert!(config.load_schedule().is_err());
}

// ==================== Rendering Tests ====================

#[tokio::test(start_paused = true)]
async fn test_full_day_renders_valid_html_fragments() {
    let schedule = every_day(vec![ActivityConfig::math_quiz(
        2,
        Operator::Add,
        9,
        title("Additions"),
    )]);
    let mut out: Vec<RenderInstruction> = Vec::new();

    run_day(
        &fast_config(),
        &schedule,
        thursday(),
        &mut StandaloneHost::default(),
        &mut out,
        Oracle,
        StdRng::seed_from_u64(5),
    )
    .await;

    let html: Vec<String> = out.iter().map(RenderInstruction::to_html).collect();
    assert!(html[0].starts_with("<time datetime=\"2025-01-02\">"));
    assert!(html.iter().any(|h| h.contains("class=\"math-question\"")));
    assert!(html
        .iter()
        .any(|h| h.contains("Submit<br><span class=\"subtitle\">Ок</span>")));
    assert!(html.iter().any(|h| h.contains("class=\"correct\"")));
}
