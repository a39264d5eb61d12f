//! Stop signal shared by the server, the reload task and the signal handler.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// One-shot stop signal.
///
/// Every long-running task holds a receiver from [`Shutdown::subscribe`];
/// the first [`Shutdown::trigger`] wakes all of them, later ones are ignored.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    fired: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            fired: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Returns false if it had already fired.
    pub fn trigger(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(tasks = notified, "Shutdown triggered");
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when `rx` observes the signal, or when its sender is gone.
pub async fn stopped(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let shutdown = Shutdown::new();
        let a = shutdown.subscribe();
        let b = shutdown.subscribe();
        assert_eq!(shutdown.receiver_count(), 2);

        assert!(shutdown.trigger());
        stopped(a).await;
        stopped(b).await;
        assert!(shutdown.is_triggered());
    }

    #[test]
    fn test_trigger_fires_once() {
        let shutdown = Shutdown::default();
        assert!(!shutdown.is_triggered());
        assert!(shutdown.trigger());
        assert!(!shutdown.trigger());
    }

    #[tokio::test]
    async fn test_dropped_sender_releases_waiters() {
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        drop(shutdown);
        stopped(rx).await;
    }
}
