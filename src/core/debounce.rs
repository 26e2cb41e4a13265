//! Trailing-edge debounce timer
//!
//! `schedule` replaces any pending action and restarts the quiet period, so a
//! burst of calls collapses into one execution of the last action. Once the
//! quiet period elapses the action runs as its own task: later calls to
//! `schedule` or `cancel` no longer affect it, but `wait_fired` can still
//! wait for it to finish.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::trace;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

type FiredActions = Arc<Mutex<Vec<JoinHandle<()>>>>;

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    fired: FiredActions,
}

fn lock_fired(fired: &Mutex<Vec<JoinHandle<()>>>) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
    match fired.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
            fired: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run `action` once the quiet period passes without another `schedule`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                trace!("debounce: replacing pending action");
            }
            previous.abort();
        }

        let delay = self.delay;
        let fired = Arc::clone(&self.fired);
        *pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let handle = tokio::spawn(action());
            let mut running = lock_fired(&fired);
            running.retain(|h| !h.is_finished());
            running.push(handle);
        }));
    }

    /// Wait until every action that has already fired has finished.
    ///
    /// Does not wait for (or run) an action still in its quiet period.
    pub async fn wait_fired(&self) {
        loop {
            let handles = std::mem::take(&mut *lock_fired(&self.fired));
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    trace!(error = %e, "debounce: fired action did not complete");
                }
            }
        }
    }

    /// Number of fired actions still running
    pub fn in_flight(&self) -> usize {
        lock_fired(&self.fired).iter().filter(|h| !h.is_finished()).count()
    }

    /// Drop the pending action without running it. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.pending().take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn sender_action(tx: &mpsc::UnboundedSender<u32>, value: u32) -> impl FnOnce() -> std::future::Ready<()> {
        let tx = tx.clone();
        move || {
            let _ = tx.send(value);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_only_the_last_action() {
        let debouncer = Debouncer::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        debouncer.schedule(sender_action(&tx, 1));
        sleep(Duration::from_millis(200)).await;
        debouncer.schedule(sender_action(&tx, 2));

        let value = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(value, Some(2));

        sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_full_quiet_period() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let (tx, mut rx) = mpsc::unbounded_channel();

        debouncer.schedule(sender_action(&tx, 7));
        sleep(Duration::from_millis(400)).await;
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.recv().await, Some(7));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_each_run() {
        let debouncer = Debouncer::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        debouncer.schedule(sender_action(&tx, 1));
        assert_eq!(timeout(Duration::from_secs(1), rx.recv()).await.unwrap(), Some(1));

        debouncer.schedule(sender_action(&tx, 2));
        assert_eq!(timeout(Duration::from_secs(1), rx.recv()).await.unwrap(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_action() {
        let debouncer = Debouncer::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        debouncer.schedule(sender_action(&tx, 1));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_fired_waits_for_a_running_action() {
        let debouncer = Debouncer::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let slow_tx = tx.clone();
        debouncer.schedule(move || async move {
            sleep(Duration::from_secs(2)).await;
            let _ = slow_tx.send(1);
        });
        sleep(Duration::from_millis(700)).await;
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.in_flight(), 1);

        debouncer.wait_fired().await;
        assert_eq!(rx.try_recv().unwrap(), 1);
        assert_eq!(debouncer.in_flight(), 0);

        // Nothing in flight: returns straight away
        debouncer.wait_fired().await;
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_does_not_abort_a_fired_action() {
        let debouncer = Debouncer::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let slow_tx = tx.clone();
        debouncer.schedule(move || async move {
            sleep(Duration::from_secs(3)).await;
            let _ = slow_tx.send(1);
        });
        sleep(Duration::from_millis(600)).await;

        // The first action is now in flight
        debouncer.schedule(sender_action(&tx, 2));

        let mut seen = vec![];
        for _ in 0..2 {
            seen.push(timeout(Duration::from_secs(10), rx.recv()).await.unwrap().unwrap());
        }
        assert_eq!(seen, vec![2, 1]);
    }
}
