//! Periodic sync trigger.
//!
//! A tokio task that calls `on_tick` once per period, starting one full period
//! after `start`. The task ends when `on_tick` returns `false` (the receiver
//! is gone), when `stop()` is called, or when the scheduler is dropped.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub struct SyncScheduler {
    handle: JoinHandle<()>,
    period: Duration,
}

impl SyncScheduler {
    /// Must be called from within a tokio runtime.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        info!("Sync scheduler started: every {}s", period.as_secs());
        let handle = tokio::spawn(async move {
            let Some(first_tick) = Instant::now().checked_add(period) else {
                warn!("Sync period {:?} is out of range, timer will never fire", period);
                return std::future::pending().await;
            };
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Sync timer fired");
                if !on_tick() {
                    debug!("Sync timer receiver dropped, stopping");
                    return;
                }
            }
        });
        Self { handle, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
