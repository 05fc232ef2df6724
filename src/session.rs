use crate::i18n::Language;
use crate::input::SubmittedAnswer;
use crate::model::Question;
use chrono::NaiveDate;
use std::collections::VecDeque;

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grade {
    Correct,
    /// The question went back to the end of the pending queue.
    Incorrect { question: Question },
}

/// Mutable record of a day's run.
///
/// Owned by the activity runner and lent to the quiz engine; nothing else
/// writes to it.
#[derive(Debug, Clone)]
pub struct SessionState {
    language: Language,
    date: NaiveDate,
    activity_index: usize,
    score: u32,
    questions_in_batch: u32,
    questions_asked: u32,
    pending: VecDeque<Question>,
    time_remaining_seconds: u32,
    total_time_seconds: u32,
}

impl SessionState {
    /// `total_time_seconds` is clamped to at least one second.
    pub fn new(language: Language, date: NaiveDate, total_time_seconds: u32) -> Self {
        let total_time_seconds = total_time_seconds.max(1);
        Self {
            language,
            date,
            activity_index: 0,
            score: 0,
            questions_in_batch: 0,
            questions_asked: 0,
            pending: VecDeque::new(),
            time_remaining_seconds: total_time_seconds,
            total_time_seconds,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn activity_index(&self) -> usize {
        self.activity_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Size of the current quiz batch.
    pub fn questions_in_batch(&self) -> u32 {
        self.questions_in_batch
    }

    /// Answers graded in the current quiz, retries included.
    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn pending(&self) -> &VecDeque<Question> {
        &self.pending
    }

    pub fn time_remaining_seconds(&self) -> u32 {
        self.time_remaining_seconds
    }

    pub fn total_time_seconds(&self) -> u32 {
        self.total_time_seconds
    }

    pub fn is_out_of_time(&self) -> bool {
        self.time_remaining_seconds == 0
    }

    /// Reset per-activity counters and load a fresh batch.
    pub fn begin_quiz(&mut self, questions: Vec<Question>) {
        self.score = 0;
        self.questions_asked = 0;
        self.questions_in_batch = questions.len() as u32;
        self.pending = questions.into();
        self.time_remaining_seconds = self.total_time_seconds;
    }

    /// Take the next question from the front of the queue.
    pub fn next_question(&mut self) -> Option<Question> {
        self.pending.pop_front()
    }

    /// Grade an answer to a question taken with `next_question`.
    ///
    /// A correct answer scores a point. A wrong or malformed one puts the
    /// question back at the end of the queue, once.
    pub fn record_answer(&mut self, question: Question, answer: &SubmittedAnswer) -> Grade {
        self.questions_asked += 1;

        if answer.matches(question.expected_answer) {
            self.score = (self.score + 1).min(self.questions_in_batch);
            Grade::Correct
        } else {
            self.pending.push_back(question.clone());
            Grade::Incorrect { question }
        }
    }

    /// Drop whatever is still pending, e.g. on timeout.
    pub fn abandon_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// One countdown tick. Returns the remaining seconds.
    pub fn tick(&mut self) -> u32 {
        self.time_remaining_seconds = self.time_remaining_seconds.saturating_sub(1);
        self.time_remaining_seconds
    }

    pub fn advance_activity(&mut self) {
        self.activity_index += 1;
    }
}
