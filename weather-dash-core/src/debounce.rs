use std::time::Duration;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

/// Quiet period before a suggestion lookup is issued.
pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_secs(1);

/// Trailing-edge debounce: at most one delayed send is pending, and scheduling
/// a new one aborts the previous.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Send `action` on `tx` once `delay` has elapsed without another call to
    /// `schedule` or `cancel`. Must be called within a tokio runtime.
    pub fn schedule<A>(&mut self, tx: &UnboundedSender<A>, action: A)
    where
        A: Send + 'static,
    {
        self.cancel();

        let tx = tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the UI is shutting down
            let _ = tx.send(action);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SUGGESTION_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn only_last_scheduled_action_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        debouncer.schedule(&tx, 1);
        tokio::time::advance(Duration::from_millis(500)).await;
        debouncer.schedule(&tx, 2);
        tokio::time::advance(Duration::from_millis(900)).await;
        debouncer.schedule(&tx, 3);
        assert!(debouncer.is_pending());

        assert_eq!(rx.recv().await, Some(3));
        assert!(start.elapsed() >= Duration::from_millis(2400));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_fire() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.delay(), SUGGESTION_DEBOUNCE);

        debouncer.schedule(&tx, "query");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }
}
