//! Periodic spam sweep
//!
//! Runs [`SpamSweep`] on a fixed interval inside a tokio task. A failed
//! sweep is logged and the schedule carries on; shutting the handle down
//! trips the sweep's cancel signal and waits for the task to exit.

use crate::config::SweepConfig;
use crate::spam::SpamSweep;
use callguard_store::CancelSignal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Spawns scheduled sweeps
#[derive(Debug)]
pub struct SweepScheduler;

impl SweepScheduler {
    /// Start the schedule on the current tokio runtime
    #[must_use]
    pub fn spawn(sweep: SpamSweep, config: &SweepConfig) -> SchedulerHandle {
        let signal = CancelSignal::new();
        let stats = Arc::new(SchedulerStats::default());
        let (stop_tx, stop_rx) = watch::channel(false);

        let task = tokio::spawn(run_schedule(
            sweep,
            config.interval(),
            config.run_on_start,
            signal.clone(),
            Arc::clone(&stats),
            stop_rx,
        ));

        tracing::info!(
            interval_secs = config.interval_secs,
            run_on_start = config.run_on_start,
            "spam sweep scheduler started"
        );

        SchedulerHandle {
            signal,
            stats,
            stop_tx,
            task,
        }
    }
}

/// Run counters shared with the scheduler task
#[derive(Debug, Default)]
pub struct SchedulerStats {
    completed: AtomicU64,
    failed: AtomicU64,
}

impl SchedulerStats {
    /// Sweeps that finished successfully
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Sweeps that returned an error
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Handle to a running schedule
///
/// Dropping the handle without [`SchedulerHandle::shutdown`] also ends the
/// schedule after the current sweep.
#[derive(Debug)]
pub struct SchedulerHandle {
    signal: CancelSignal,
    stats: Arc<SchedulerStats>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Run counters
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Cancel any in-flight sweep and stop the schedule
    pub async fn shutdown(self) {
        self.signal.cancel();
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "spam sweep scheduler task failed");
        }
        tracing::info!(
            completed = self.stats.completed(),
            failed = self.stats.failed(),
            "spam sweep scheduler stopped"
        );
    }
}

async fn run_schedule(
    sweep: SpamSweep,
    period: Duration,
    run_on_start: bool,
    signal: CancelSignal,
    stats: Arc<SchedulerStats>,
    mut stop_rx: watch::Receiver<bool>,
) {
    // tokio rejects a zero period
    let mut ticks = time::interval(period.max(Duration::from_secs(1)));
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    if !run_on_start {
        // First tick completes immediately
        ticks.tick().await;
    }

    loop {
        tokio::select! {
            _ = ticks.tick() => {}
            _ = stop_rx.changed() => break,
        }
        if signal.is_cancelled() {
            break;
        }

        match sweep.run(&signal) {
            Ok(_) => {
                stats.completed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) if e.is_cancelled() => break,
            Err(e) => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "scheduled spam sweep failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callguard_store::{MemoryUserStore, StoreError, UserStore};
    use callguard_test_utils::{phone, user, MockUserStore};

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn config(run_on_start: bool) -> SweepConfig {
        SweepConfig {
            enabled: true,
            interval_secs: 60,
            run_on_start,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_on_start_when_asked() {
        let store = Arc::new(MemoryUserStore::new());
        store.upsert(&CancelSignal::new(), &user(1, "Alice")).unwrap();

        let handle = SweepScheduler::spawn(
            SpamSweep::with_default_predicate(store.clone()),
            &config(true),
        );
        settle().await;

        assert_eq!(handle.stats().completed(), 1);
        let found = store
            .get_by_phone_number(&CancelSignal::new(), &phone(1))
            .unwrap();
        assert!(found.is_spam);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn waits_one_interval_otherwise() {
        let store = Arc::new(MemoryUserStore::new());
        let handle = SweepScheduler::spawn(
            SpamSweep::with_default_predicate(store),
            &config(false),
        );
        settle().await;
        assert_eq!(handle.stats().completed(), 0);

        time::advance(Duration::from_secs(61)).await;
        settle().await;
        assert_eq!(handle.stats().completed(), 1);

        time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(handle.stats().completed(), 2);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn failures_do_not_stop_schedule() {
        let store = Arc::new(
            MockUserStore::new().with_get_all(|_| Err(StoreError::backend("scan failed"))),
        );
        let handle = SweepScheduler::spawn(
            SpamSweep::with_default_predicate(store),
            &config(true),
        );
        settle().await;
        assert_eq!(handle.stats().failed(), 1);

        time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(handle.stats().failed(), 2);
        assert_eq!(handle.stats().completed(), 0);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_sweeps() {
        let store = Arc::new(MemoryUserStore::new());
        let handle = SweepScheduler::spawn(
            SpamSweep::with_default_predicate(store.clone()),
            &config(false),
        );
        handle.shutdown().await;

        store.upsert(&CancelSignal::new(), &user(1, "Alice")).unwrap();
        time::advance(Duration::from_secs(120)).await;
        settle().await;

        let found = store
            .get_by_phone_number(&CancelSignal::new(), &phone(1))
            .unwrap();
        assert!(!found.is_spam);
    }
}
