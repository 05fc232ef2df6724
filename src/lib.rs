//! Daily math activities for a Telegram Mini App.
//!
//! A static weekly schedule picks the day's activities, the quiz engine runs
//! each one against a countdown, and everything shown to the user goes out
//! as [`render::RenderInstruction`]s in the day's rotating language with a
//! Russian subtitle.

pub mod app;
pub mod config;
pub mod generator;
pub mod host;
pub mod i18n;
pub mod input;
pub mod model;
pub mod quiz;
pub mod render;
pub mod runner;
pub mod schedule;
pub mod session;
pub mod terminal;
pub mod timer;
