use crate::i18n::{bilingual, Language, StringKey};
use crate::input::AnswerSource;
use crate::model::{ActivityConfig, ActivityKind};
use crate::quiz::{QuizEngine, QuizOutcome};
use crate::render::{RenderInstruction, Renderer};
use crate::session::SessionState;
use rand::Rng;
use tracing::info;

/// Result of one activity in the day's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityReport {
    pub index: usize,
    pub outcome: QuizOutcome,
}

/// Everything the runner did once the list is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    pub reports: Vec<ActivityReport>,
}

impl Completion {
    pub fn all_completed(&self) -> bool {
        self.reports.iter().all(|report| report.outcome.is_completed())
    }

    pub fn total_score(&self) -> u32 {
        self.reports.iter().map(|report| report.outcome.score()).sum()
    }
}

/// Walks a day's activities in order, one at a time.
pub struct ActivityRunner<R, A, G> {
    state: SessionState,
    engine: QuizEngine,
    renderer: R,
    answers: A,
    rng: G,
}

impl<R, A, G> ActivityRunner<R, A, G>
where
    R: Renderer,
    A: AnswerSource,
    G: Rng,
{
    pub fn new(state: SessionState, engine: QuizEngine, renderer: R, answers: A, rng: G) -> Self {
        Self {
            state,
            engine,
            renderer,
            answers,
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run every remaining activity, then show the end-of-day message.
    ///
    /// A timed-out activity ends only itself; the runner moves on to the next.
    pub async fn run_activities(&mut self, activities: &[ActivityConfig]) -> Completion {
        let mut completion = Completion::default();

        while let Some(activity) = activities.get(self.state.activity_index()) {
            let index = self.state.activity_index();
            let language = self.state.language();
            info!(
                "Activity {}/{}: {}",
                index + 1,
                activities.len(),
                activity.title.get(language)
            );

            self.renderer.render(RenderInstruction::HideFeedback);
            self.renderer.render(RenderInstruction::Title {
                primary: activity.title.get(language).to_string(),
                subtitle: activity.title.get(Language::subtitle()).to_string(),
            });

            let outcome = match &activity.kind {
                ActivityKind::MathQuiz(config) => {
                    self.engine
                        .run(
                            config,
                            &mut self.state,
                            &mut self.renderer,
                            &mut self.answers,
                            &mut self.rng,
                        )
                        .await
                }
            };

            completion.reports.push(ActivityReport { index, outcome });
            self.state.advance_activity();
        }

        self.renderer.render(RenderInstruction::HideFeedback);
        self.renderer.render(RenderInstruction::Message {
            text: bilingual(StringKey::GoodJob, self.state.language()),
        });
        info!(
            "All {} activities done, total score {}",
            completion.reports.len(),
            completion.total_score()
        );

        completion
    }
}
