//! Declarative render instructions.
//!
//! The engine never touches a display. It emits [`RenderInstruction`]s to a
//! [`Renderer`] owned by the presentation layer, which may show them as text
//! or as HTML fragments (see [`RenderInstruction::to_html`]).

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Date of the session, emitted once per day.
    DateHeader { date: NaiveDate },
    /// Activity title in the primary and subtitle languages.
    Title { primary: String, subtitle: String },
    /// The question to answer, with the submit caption.
    Question {
        text: String,
        submit_label: String,
        submit_subtitle: String,
    },
    Feedback {
        correct: bool,
        /// e.g. "Good job! (Молодец!)"
        label: String,
        /// e.g. "24 / 4 = 6" after a wrong answer
        detail: Option<String>,
    },
    HideFeedback,
    Score {
        line: String,
        score: u32,
        total: u32,
    },
    Timer {
        line: String,
        remaining_seconds: u32,
    },
    /// Full-width status message: timeout, end of day or rest day.
    Message { text: String },
}

/// Sink for render instructions.
pub trait Renderer {
    fn render(&mut self, instruction: RenderInstruction);
}

/// Collects instructions, e.g. for tests or server-side snapshots.
impl Renderer for Vec<RenderInstruction> {
    fn render(&mut self, instruction: RenderInstruction) {
        self.push(instruction);
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, instruction: RenderInstruction) {
        (**self).render(instruction);
    }
}

/// Format seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

impl RenderInstruction {
    /// Plain-text rendering, one line per instruction.
    pub fn to_text(&self) -> String {
        match self {
            RenderInstruction::DateHeader { date } => date.format("%Y-%m-%d").to_string(),
            RenderInstruction::Title { primary, subtitle } => format!("{} ({})", primary, subtitle),
            RenderInstruction::Question { text, .. } => format!("{} = ?", text),
            RenderInstruction::Feedback {
                correct,
                label,
                detail,
            } => {
                let mark = if *correct { "✅" } else { "❌" };
                match detail {
                    Some(detail) => format!("{} {}: {}", mark, label, detail),
                    None => format!("{} {}", mark, label),
                }
            }
            RenderInstruction::HideFeedback => String::new(),
            RenderInstruction::Score { line, .. } => line.clone(),
            RenderInstruction::Timer { line, .. } => line.clone(),
            RenderInstruction::Message { text } => text.clone(),
        }
    }

    /// HTML fragment for a web view.
    pub fn to_html(&self) -> String {
        match self {
            RenderInstruction::DateHeader { date } => format!(
                "<time datetime=\"{0}\">{0}</time>",
                date.format("%Y-%m-%d")
            ),
            RenderInstruction::Title { primary, subtitle } => format!(
                "<h2 id=\"activity-title\">{} <span class=\"subtitle\">({})</span></h2>",
                escape_html(primary),
                escape_html(subtitle)
            ),
            RenderInstruction::Question {
                text,
                submit_label,
                submit_subtitle,
            } => format!(
                "<div class=\"math-quiz-container\">\
                 <div class=\"math-question\">{}</div>\
                 <form class=\"math-form\">\
                 <input type=\"number\" class=\"math-input\" autofocus />\
                 <button type=\"submit\" class=\"math-submit\">{}<br><span class=\"subtitle\">{}</span></button>\
                 </form></div>",
                escape_html(text),
                escape_html(submit_label),
                escape_html(submit_subtitle)
            ),
            RenderInstruction::Feedback {
                correct,
                label,
                detail,
            } => {
                let (class, mark) = if *correct {
                    ("correct", "✅")
                } else {
                    ("incorrect", "❌")
                };
                let body = match detail {
                    Some(detail) => format!(
                        "{} {}: <strong>{}</strong>",
                        mark,
                        escape_html(label),
                        escape_html(detail)
                    ),
                    None => format!("{} {}", mark, escape_html(label)),
                };
                format!("<div id=\"correction-box\" class=\"{}\">{}</div>", class, body)
            }
            RenderInstruction::HideFeedback => {
                "<div id=\"correction-box\" class=\"hidden\"></div>".to_string()
            }
            RenderInstruction::Score { line, .. } => {
                format!("<div id=\"activity-score\">{}</div>", escape_html(line))
            }
            RenderInstruction::Timer { line, .. } => {
                format!("<div id=\"activity-timer\">{}</div>", escape_html(line))
            }
            RenderInstruction::Message { text } => format!("<h2>{}</h2>", escape_html(text)),
        }
    }
}
