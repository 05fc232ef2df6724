use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Tick period of the activity countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Recurring one-second tick for the quiz time budget.
///
/// The countdown owns at most one interval. `start` drops the previous one
/// before installing a new one, so ticks from two timers can never interleave.
/// While stopped, `tick` never resolves.
#[derive(Debug)]
pub struct Countdown {
    period: Duration,
    interval: Option<Interval>,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            period: TICK_PERIOD,
            interval: None,
        }
    }

    /// (Re)start ticking. The first tick fires one period from now.
    pub fn start(&mut self) {
        self.stop();
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        debug!("Countdown started");
    }

    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            debug!("Countdown stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
