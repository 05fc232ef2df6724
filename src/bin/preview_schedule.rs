//! Preview binary - prints the coming week without running any activity
//!
//! Usage:
//!   cargo run --bin preview
//!   ACTIVITY_DATE=2025-03-01 cargo run --bin preview
//!
//! Optional environment variables:
//! - SCHEDULE_FILE (defaults to the built-in weekly program)
//! - LANGUAGE_EPOCH (defaults to 2025-01-01)
//! - ACTIVITY_DATE (first day of the preview, defaults to today)

use anyhow::Result;
use chrono::Duration;
use daily_activity::app::plan_day;
use daily_activity::config::Config;
use daily_activity::generator::generate_questions;
use daily_activity::i18n::Language;
use daily_activity::model::{ActivityKind, MathQuizConfig};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("daily_activity=warn".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let schedule = config.load_schedule()?;
    let start = config.activity_date_or_today();
    let mut rng = rand::rng();

    println!("\n{}", "=".repeat(60));
    println!("WEEK PREVIEW from {}", start);
    println!("{}\n", "=".repeat(60));

    for offset in 0..7 {
        let date = start + Duration::days(offset);
        let plan = plan_day(&schedule, date, config.language_epoch);

        println!(
            "{} ({}) - {}",
            date.format("%Y-%m-%d %A"),
            plan.weekday,
            plan.language.native_name()
        );

        if plan.is_rest_day() {
            println!("    rest day");
            continue;
        }

        for activity in plan.activities {
            println!(
                "    {} ({})",
                activity.title.get(plan.language),
                activity.title.get(Language::subtitle())
            );
            match &activity.kind {
                ActivityKind::MathQuiz(quiz) => {
                    let sample = MathQuizConfig { count: 1, ..*quiz };
                    let example = generate_questions(&sample, &mut rng)
                        .into_iter()
                        .next()
                        .map(|q| format!("{} = {}", q.text, q.expected_answer))
                        .unwrap_or_default();
                    println!(
                        "        {} questions, operator {}, max {}, e.g. {}",
                        quiz.count, quiz.operator, quiz.max_operand, example
                    );
                }
            }
        }
    }

    println!("\nTime limit per activity: {}s", config.quiz_time_limit_secs);
    Ok(())
}
