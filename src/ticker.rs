//! Periodic tick source for the question countdown.

use std::future;
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Period of the question countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A stoppable interval. While stopped, [`tick`](Ticker::tick) never resolves,
/// so it can sit in a `select!` without producing stale ticks.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Starts ticking one period from now. Does nothing if already running.
    pub fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }

        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Stops ticking. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Starts a fresh period from now, so the next tick is a full period away.
    pub fn restart(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => interval.reset(),
            None => self.start(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
