//! Stoppable game-logic timer
//!
//! The driver owns exactly one `Ticker`. While stopped, [`Ticker::tick`]
//! never resolves, so a `select!` branch on it can stay in place without
//! producing ticks for a paused or finished game.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

#[derive(Debug, Default)]
pub struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// (Re)arm the timer; the first tick fires one full `period` from now
    pub fn start(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Drop the timer; no tick is delivered until the next `start`
    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Change the period of a running timer. No-op while stopped.
    pub fn set_period(&mut self, period: Duration) {
        if self.period() != Some(period) && self.is_running() {
            self.start(period);
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(|interval| interval.period())
    }

    /// Wait for the next tick, or forever while stopped
    pub async fn tick(&mut self) -> Instant {
        match self.interval.as_mut() {
            Some(interval) => interval.tick().await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_period() {
        let mut ticker = Ticker::new();
        ticker.start(Duration::from_millis(100));

        let start = Instant::now();
        ticker.tick().await;
        ticker.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert!(start.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_never_fires() {
        let mut ticker = Ticker::new();
        assert!(timeout(Duration::from_secs(5), ticker.tick()).await.is_err());

        ticker.start(Duration::from_millis(10));
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(timeout(Duration::from_secs(5), ticker.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_period_rearms_running_timer() {
        let mut ticker = Ticker::new();
        ticker.set_period(Duration::from_millis(50));
        assert!(!ticker.is_running());

        ticker.start(Duration::from_millis(100));
        ticker.set_period(Duration::from_millis(40));
        assert_eq!(ticker.period(), Some(Duration::from_millis(40)));

        let start = Instant::now();
        ticker.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
