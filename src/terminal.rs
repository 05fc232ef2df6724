//! Line-oriented presentation for running outside of Telegram.

use crate::input::ChannelAnswers;
use crate::render::{RenderInstruction, Renderer};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Prints render instructions as text or HTML lines.
///
/// Timer updates are printed every 30 seconds and for the last 10 seconds
/// only, so the question stays readable.
pub struct TerminalRenderer<W: Write> {
    out: W,
    html: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, html: bool) -> Self {
        Self { out, html }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn should_print(&self, instruction: &RenderInstruction) -> bool {
        match instruction {
            RenderInstruction::Timer {
                remaining_seconds, ..
            } => remaining_seconds % 30 == 0 || *remaining_seconds <= 10,
            RenderInstruction::HideFeedback => self.html,
            _ => true,
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, instruction: RenderInstruction) {
        if !self.should_print(&instruction) {
            return;
        }

        let line = if self.html {
            instruction.to_html()
        } else {
            instruction.to_text()
        };

        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

/// Forward stdin lines to a [`ChannelAnswers`] source.
///
/// The source closes when stdin reaches end of file.
pub fn stdin_answers() -> ChannelAnswers {
    let (sender, answers) = ChannelAnswers::channel(16);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if sender.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    debug!("stdin closed");
                    break;
                }
                Err(e) => {
                    warn!("Failed to read answer from stdin: {}", e);
                    break;
                }
            }
        }
    });

    answers
}
