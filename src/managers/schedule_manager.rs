//! Schedule Manager for Linkding Sync.
//!
//! Owns the single recurring sync trigger. The first tick fires one full interval
//! after `start`; there is no run at startup. Each tick spawns the job without
//! waiting for the previous one, and stopping the trigger never cancels a run that
//! is already in flight.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Longest supported interval, one year.
pub const MAX_INTERVAL_MINUTES: u64 = 60 * 24 * 365;

/// Work invoked on every tick.
pub type SyncJob = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Wraps an async closure as a [`SyncJob`].
pub fn sync_job<F, Fut>(f: F) -> SyncJob
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || -> Pin<Box<dyn Future<Output = ()> + Send>> { Box::pin(f()) })
}

/// Trait defining schedule management operations.
pub trait ScheduleManagerTrait {
    /// Replaces any running trigger. Returns false when `interval_minutes` is 0,
    /// which leaves no trigger running.
    fn start(&mut self, interval_minutes: u64, job: SyncJob) -> bool;
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    /// Interval of the running trigger, if any.
    fn interval_minutes(&self) -> Option<u64>;
}

/// Tokio-backed schedule manager. Must be started from within a runtime.
#[derive(Default)]
pub struct ScheduleManager {
    handle: Option<JoinHandle<()>>,
    interval_minutes: u64,
}

impl ScheduleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period for an interval given in minutes, capped at [`MAX_INTERVAL_MINUTES`].
    pub fn period(interval_minutes: u64) -> Duration {
        Duration::from_secs(interval_minutes.min(MAX_INTERVAL_MINUTES) * 60)
    }
}

impl ScheduleManagerTrait for ScheduleManager {
    fn start(&mut self, interval_minutes: u64, job: SyncJob) -> bool {
        self.stop();
        if interval_minutes == 0 {
            info!("Automatic fetching disabled");
            return false;
        }

        let period = Self::period(interval_minutes);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Scheduled sync triggered");
                tokio::spawn(job());
            }
        });

        info!(interval_minutes, "Automatic fetching scheduled");
        self.handle = Some(handle);
        self.interval_minutes = interval_minutes;
        true
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(interval_minutes = self.interval_minutes, "Scheduled sync stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn interval_minutes(&self) -> Option<u64> {
        if self.is_running() {
            Some(self.interval_minutes)
        } else {
            None
        }
    }
}

impl Drop for ScheduleManager {
    fn drop(&mut self) {
        self.stop();
    }
}
