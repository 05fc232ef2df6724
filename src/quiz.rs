use crate::generator::generate_questions;
use crate::i18n::{bilingual, lookup, Language, StringKey};
use crate::input::{AnswerSource, SubmittedAnswer};
use crate::model::{MathQuizConfig, Question};
use crate::render::{format_clock, RenderInstruction, Renderer};
use crate::session::{Grade, SessionState};
use crate::timer::Countdown;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// How long feedback stays on screen after each answer.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone)]
pub struct QuizSettings {
    pub feedback_delay: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }
}

/// Where the engine is in a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Generating,
    Presenting,
    AwaitingAnswer,
    Grading,
    Completed,
    TimedOut,
}

/// Terminal state of one quiz activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// Every question was eventually answered correctly.
    Completed { score: u32, total: u32 },
    /// The time budget ran out first.
    TimedOut { score: u32, total: u32 },
}

impl QuizOutcome {
    pub fn score(&self) -> u32 {
        match self {
            QuizOutcome::Completed { score, .. } | QuizOutcome::TimedOut { score, .. } => *score,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, QuizOutcome::Completed { .. })
    }
}

enum Wait {
    Answered(String),
    TimedOut,
}

/// Runs one math quiz: generate, ask, grade, requeue, until done or out of time.
#[derive(Debug)]
pub struct QuizEngine {
    settings: QuizSettings,
    countdown: Countdown,
    phase: QuizPhase,
}

impl QuizEngine {
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            settings,
            countdown: Countdown::new(),
            phase: QuizPhase::Idle,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Run a quiz to its terminal state.
    ///
    /// The countdown only runs while a question is on screen; it is stopped
    /// for grading and the feedback pause, and restarted only if time remains.
    pub async fn run<R, A, G>(
        &mut self,
        config: &MathQuizConfig,
        state: &mut SessionState,
        renderer: &mut R,
        answers: &mut A,
        rng: &mut G,
    ) -> QuizOutcome
    where
        R: Renderer + ?Sized,
        A: AnswerSource + ?Sized,
        G: Rng + ?Sized,
    {
        self.phase = QuizPhase::Generating;
        state.begin_quiz(generate_questions(config, rng));
        info!(
            "Starting {} quiz: {} questions, {}s budget",
            config.operator,
            state.questions_in_batch(),
            state.total_time_seconds()
        );

        render_score(state, renderer);
        render_timer(state, renderer);
        self.countdown.start();

        loop {
            if state.is_out_of_time() {
                return self.time_out(state, renderer, answers);
            }
            let Some(question) = state.next_question() else {
                break;
            };

            self.phase = QuizPhase::Presenting;
            let stale = answers.discard_pending();
            if stale > 0 {
                debug!("Dropped {} answers submitted between questions", stale);
            }
            renderer.render(RenderInstruction::Question {
                text: question.text.clone(),
                submit_label: lookup(StringKey::Submit, state.language()).to_string(),
                submit_subtitle: lookup(StringKey::Submit, Language::subtitle()).to_string(),
            });

            self.phase = QuizPhase::AwaitingAnswer;
            let raw = match await_answer(&mut self.countdown, &question, state, renderer, answers)
                .await
            {
                Wait::Answered(raw) => raw,
                Wait::TimedOut => return self.time_out(state, renderer, answers),
            };

            self.phase = QuizPhase::Grading;
            self.countdown.stop();
            let answer = SubmittedAnswer::parse(&raw);
            debug!("Answer {:?} for {}", answer, question.text);

            match state.record_answer(question, &answer) {
                Grade::Correct => {
                    render_score(state, renderer);
                    renderer.render(RenderInstruction::Feedback {
                        correct: true,
                        label: bilingual(StringKey::GoodJob, state.language()),
                        detail: None,
                    });
                }
                Grade::Incorrect { question } => {
                    debug!("Requeued {} ({} pending)", question.text, state.pending().len());
                    renderer.render(RenderInstruction::Feedback {
                        correct: false,
                        label: bilingual(StringKey::CorrectAnswerIs, state.language()),
                        detail: Some(format!("{} = {}", question.text, question.expected_answer)),
                    });
                }
            }

            sleep(self.settings.feedback_delay).await;

            if !state.is_out_of_time() {
                self.countdown.start();
            }
            renderer.render(RenderInstruction::HideFeedback);
        }

        self.countdown.stop();
        self.phase = QuizPhase::Completed;
        info!(
            "Quiz completed: {}/{} after {} answers",
            state.score(),
            state.questions_in_batch(),
            state.questions_asked()
        );
        QuizOutcome::Completed {
            score: state.score(),
            total: state.questions_in_batch(),
        }
    }

    fn time_out<R, A>(
        &mut self,
        state: &mut SessionState,
        renderer: &mut R,
        answers: &mut A,
    ) -> QuizOutcome
    where
        R: Renderer + ?Sized,
        A: AnswerSource + ?Sized,
    {
        self.countdown.stop();
        // A submission racing the last tick is left unread
        answers.discard_pending();
        let dropped = state.abandon_pending();
        warn!(
            "Time is up with score {}/{} ({} questions still pending)",
            state.score(),
            state.questions_in_batch(),
            dropped
        );

        renderer.render(RenderInstruction::Message {
            text: lookup(StringKey::Timeout, state.language()).to_string(),
        });
        self.phase = QuizPhase::TimedOut;
        QuizOutcome::TimedOut {
            score: state.score(),
            total: state.questions_in_batch(),
        }
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new(QuizSettings::default())
    }
}

/// Wait for a submission while the countdown ticks.
///
/// A tick that exhausts the budget wins over a submission arriving at the same
/// time; that submission stays unread until the timeout discards it. A closed
/// input leaves only the countdown, so the wait still ends.
async fn await_answer<R, A>(
    countdown: &mut Countdown,
    question: &Question,
    state: &mut SessionState,
    renderer: &mut R,
    answers: &mut A,
) -> Wait
where
    R: Renderer + ?Sized,
    A: AnswerSource + ?Sized,
{
    let submission = answers.next_answer(question);
    tokio::pin!(submission);
    let mut input_open = true;

    loop {
        tokio::select! {
            biased;

            () = countdown.tick() => {
                let remaining = state.tick();
                render_timer(state, renderer);
                if remaining == 0 {
                    return Wait::TimedOut;
                }
            }
            raw = &mut submission, if input_open => match raw {
                Some(raw) => return Wait::Answered(raw),
                None => {
                    warn!("Answer input closed, waiting for the countdown");
                    input_open = false;
                }
            },
        }
    }
}

fn render_score<R: Renderer + ?Sized>(state: &SessionState, renderer: &mut R) {
    renderer.render(RenderInstruction::Score {
        line: format!(
            "{}: {} / {}",
            bilingual(StringKey::Score, state.language()),
            state.score(),
            state.questions_in_batch()
        ),
        score: state.score(),
        total: state.questions_in_batch(),
    });
}

fn render_timer<R: Renderer + ?Sized>(state: &SessionState, renderer: &mut R) {
    let remaining = state.time_remaining_seconds();
    renderer.render(RenderInstruction::Timer {
        line: format!(
            "{}: {}",
            bilingual(StringKey::Time, state.language()),
            format_clock(remaining)
        ),
        remaining_seconds: remaining,
    });
}
