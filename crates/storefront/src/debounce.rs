//! Debounce controller for coalescing rapid input events.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

/// Coalesces rapid calls into a single delayed action.
///
/// [`schedule`](Self::schedule) cancels any pending action and arms a new
/// one that runs after the quiet interval with no further calls. Only the
/// most recent call within the interval survives; cancelled actions never
/// run, and there is no queuing of multiple pending actions.
///
/// The controller exclusively owns the single pending-timer handle. It is
/// safe to call `schedule` repeatedly from rapid successive input events;
/// at most one armed action exists at a time.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a controller with the given quiet interval.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Arm `action` to run once the quiet interval elapses, cancelling any
    /// previously armed action.
    ///
    /// The action is aborted while still waiting if `schedule` is called
    /// again before the interval elapses, so superseded actions are never
    /// executed.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(quiet).await;
            action.await;
        }));
    }

    /// Cancel the pending action, if any, without arming a new one.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    type FiredLog = Arc<Mutex<Vec<(String, u64)>>>;

    fn record(log: &FiredLog, query: &str, start: Instant) -> impl Future<Output = ()> + use<> {
        let log = Arc::clone(log);
        let query = query.to_string();
        async move {
            let elapsed = u64::try_from(start.elapsed().as_millis()).unwrap();
            log.lock().unwrap().push((query, elapsed));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_call_fires() {
        let log: FiredLog = Arc::default();
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        // Calls at t=0, t=100, t=200: only the last survives, firing at
        // t=700; the earlier two are cancelled and never run.
        for (at, query) in [(0_u64, "i"), (100, "ip"), (200, "iph")] {
            time::sleep_until(start + Duration::from_millis(at)).await;
            debouncer.schedule(record(&log, query, start));
        }

        time::sleep_until(start + Duration::from_millis(1_000)).await;

        let fired = log.lock().unwrap();
        assert_eq!(fired.as_slice(), [("iph".to_string(), 700)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_interval_lets_action_fire() {
        let log: FiredLog = Arc::default();
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(&log, "first", start));
        time::sleep(Duration::from_millis(600)).await;

        // The first action already fired; a later call arms a fresh one.
        debouncer.schedule(record(&log, "second", start));
        time::sleep(Duration::from_millis(600)).await;

        let fired = log.lock().unwrap();
        assert_eq!(
            fired.as_slice(),
            [("first".to_string(), 500), ("second".to_string(), 1_100)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_just_before_deadline() {
        let log: FiredLog = Arc::default();
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(&log, "old", start));
        time::sleep(Duration::from_millis(499)).await;
        debouncer.schedule(record(&log, "new", start));
        time::sleep(Duration::from_millis(1_000)).await;

        let fired = log.lock().unwrap();
        assert_eq!(fired.as_slice(), [("new".to_string(), 999)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_action() {
        let log: FiredLog = Arc::default();
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(&log, "doomed", start));
        debouncer.cancel();
        time::sleep(Duration::from_millis(1_000)).await;

        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_action() {
        let log: FiredLog = Arc::default();
        let start = Instant::now();

        {
            let mut debouncer = Debouncer::new(Duration::from_millis(500));
            debouncer.schedule(record(&log, "doomed", start));
        }

        time::sleep(Duration::from_millis(1_000)).await;
        assert!(log.lock().unwrap().is_empty());
    }
}
