use crate::i18n::default_epoch;
use crate::quiz::DEFAULT_FEEDBACK_DELAY;
use crate::schedule::Schedule;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::str::FromStr;
use std::time::Duration;

/// Default per-activity time budget.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    // Quiz timing
    pub quiz_time_limit_secs: u32,
    pub feedback_delay_ms: u64,

    // Language rotation
    pub language_epoch: NaiveDate,

    // Schedule
    pub schedule_file: Option<String>,
    /// Run as if it were this day instead of today
    pub activity_date: Option<NaiveDate>,

    // Presentation
    pub render_html: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY.as_millis() as u64,
            language_epoch: default_epoch(),
            schedule_file: None,
            activity_date: None,
            render_html: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            quiz_time_limit_secs: parse_var("QUIZ_TIME_LIMIT_SECS", defaults.quiz_time_limit_secs)?,
            feedback_delay_ms: parse_var("FEEDBACK_DELAY_MS", defaults.feedback_delay_ms)?,

            language_epoch: match non_empty_var("LANGUAGE_EPOCH") {
                Some(value) => parse_date("LANGUAGE_EPOCH", &value)?,
                None => defaults.language_epoch,
            },

            schedule_file: non_empty_var("SCHEDULE_FILE"),
            activity_date: non_empty_var("ACTIVITY_DATE")
                .map(|value| parse_date("ACTIVITY_DATE", &value))
                .transpose()?,

            render_html: match non_empty_var("RENDER_HTML") {
                Some(value) => parse_bool("RENDER_HTML", &value)?,
                None => defaults.render_html,
            },
        };

        if config.quiz_time_limit_secs == 0 {
            bail!("QUIZ_TIME_LIMIT_SECS must be greater than 0");
        }

        Ok(config)
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    /// The configured schedule file, or the built-in weekly program.
    pub fn load_schedule(&self) -> Result<Schedule> {
        match &self.schedule_file {
            Some(path) => Schedule::from_file(path)
                .with_context(|| format!("Failed to load schedule from {}", path)),
            None => Ok(Schedule::weekly_default()),
        }
    }

    /// `ACTIVITY_DATE` if set, otherwise the local calendar date.
    pub fn activity_date_or_today(&self) -> NaiveDate {
        self.activity_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("{} has invalid value '{}'", name, value)),
        None => Ok(default),
    }
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("{} must be a YYYY-MM-DD date, got '{}'", name, value))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{} must be a boolean, got '{}'", name, value),
    }
}
