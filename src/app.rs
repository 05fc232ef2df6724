//! One day of activities, from host handshake to the final message.

use crate::config::Config;
use crate::host::{handshake, HostBridge};
use crate::i18n::{bilingual, select_language, Language, StringKey};
use crate::input::AnswerSource;
use crate::model::ActivityConfig;
use crate::quiz::{QuizEngine, QuizSettings};
use crate::render::{RenderInstruction, Renderer};
use crate::runner::{ActivityRunner, Completion};
use crate::schedule::{weekday_index, Schedule};
use crate::session::SessionState;
use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

/// What a day is going to look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan<'a> {
    pub date: NaiveDate,
    pub weekday: u8,
    pub language: Language,
    pub activities: &'a [ActivityConfig],
}

impl DayPlan<'_> {
    pub fn is_rest_day(&self) -> bool {
        self.activities.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// Nothing scheduled; the runner never started.
    RestDay,
    Finished(Completion),
}

pub fn plan_day(schedule: &Schedule, date: NaiveDate, epoch: NaiveDate) -> DayPlan<'_> {
    DayPlan {
        date,
        weekday: weekday_index(date),
        language: select_language(date, epoch),
        activities: schedule.for_date(date),
    }
}

/// Run the activities scheduled for `date`.
pub async fn run_day<H, R, A, G>(
    config: &Config,
    schedule: &Schedule,
    date: NaiveDate,
    host: &mut H,
    mut renderer: R,
    answers: A,
    rng: G,
) -> DayOutcome
where
    H: HostBridge + ?Sized,
    R: Renderer,
    A: AnswerSource,
    G: Rng,
{
    handshake(host);

    let plan = plan_day(schedule, date, config.language_epoch);
    info!(
        "Day {} (weekday {}), language {}, {} activities",
        plan.date,
        plan.weekday,
        plan.language,
        plan.activities.len()
    );
    renderer.render(RenderInstruction::DateHeader { date });

    if plan.is_rest_day() {
        renderer.render(RenderInstruction::Message {
            text: bilingual(StringKey::RestDay, plan.language),
        });
        info!("Rest day, nothing to run");
        return DayOutcome::RestDay;
    }

    let state = SessionState::new(plan.language, date, config.quiz_time_limit_secs);
    let engine = QuizEngine::new(QuizSettings {
        feedback_delay: config.feedback_delay(),
    });
    let mut runner = ActivityRunner::new(state, engine, renderer, answers, rng);

    DayOutcome::Finished(runner.run_activities(plan.activities).await)
}
