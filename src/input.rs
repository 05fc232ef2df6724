//! Answer input channel.
//!
//! The presentation layer hands raw text back to the engine; parsing into
//! [`SubmittedAnswer`] happens here so that malformed input is simply a wrong
//! answer.

use crate::model::Question;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::mpsc;

/// A parsed answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedAnswer {
    Number(i64),
    /// Anything that is not an integer. Never equal to an expected answer.
    Malformed(String),
}

impl SubmittedAnswer {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(value) => SubmittedAnswer::Number(value),
            Err(_) => SubmittedAnswer::Malformed(trimmed.to_string()),
        }
    }

    pub fn matches(&self, expected: i64) -> bool {
        matches!(self, SubmittedAnswer::Number(value) if *value == expected)
    }
}

/// Where submitted answers come from.
///
/// `next_answer` resolves with the raw text of the next submission for
/// `question`, or `None` once the input is closed.
///
/// Submissions only count while a question is on screen. `discard_pending`
/// drops whatever was submitted before that and returns how many were lost.
pub trait AnswerSource {
    fn next_answer(&mut self, question: &Question) -> impl Future<Output = Option<String>>;

    fn discard_pending(&mut self) -> usize {
        0
    }
}

impl<A: AnswerSource + ?Sized> AnswerSource for &mut A {
    fn next_answer(&mut self, question: &Question) -> impl Future<Output = Option<String>> {
        (**self).next_answer(question)
    }

    fn discard_pending(&mut self) -> usize {
        (**self).discard_pending()
    }
}

/// Answers pushed through a tokio channel, one line per submission.
pub struct ChannelAnswers {
    receiver: mpsc::Receiver<String>,
}

impl ChannelAnswers {
    pub fn new(receiver: mpsc::Receiver<String>) -> Self {
        Self { receiver }
    }

    /// Create a source together with the sender the presentation layer uses.
    pub fn channel(buffer: usize) -> (mpsc::Sender<String>, Self) {
        let (sender, receiver) = mpsc::channel(buffer);
        (sender, Self::new(receiver))
    }
}

impl AnswerSource for ChannelAnswers {
    async fn next_answer(&mut self, _question: &Question) -> Option<String> {
        self.receiver.recv().await
    }

    fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while self.receiver.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }
}

/// Pre-recorded answers, handed out in order.
///
/// Useful for demos and tests; closes once the script runs out. Each entry
/// answers one question as it appears, so nothing is ever pending.
#[derive(Debug, Default, Clone)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl AnswerSource for ScriptedAnswers {
    async fn next_answer(&mut self, _question: &Question) -> Option<String> {
        self.answers.pop_front()
    }
}
