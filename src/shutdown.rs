//! Cooperative shutdown signal shared by a view-model's background tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cloneable shutdown flag with async wait support.
///
/// The engine's dispatch loop, the task runner and recurring effects all
/// hold a clone and stop once [`signal`](Self::signal) has been called.
#[derive(Clone, Debug, Default)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Signal shutdown. Returns false if it was already signaled.
    pub fn signal(&self) -> bool {
        if self.shutdown.swap(true, Ordering::SeqCst) {
            return false;
        }
        tracing::debug!("Shutdown signaled");
        self.notify.notify_waiters();
        true
    }

    pub async fn wait(&self) {
        // Register with Notify before reading the flag, otherwise a signal
        // landing between the two is lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_returns_after_signal() {
        let handle = ShutdownHandle::new();
        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.wait().await })
        };

        assert!(handle.signal());
        tokio::time::timeout(Duration::from_millis(200), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_after_signal_is_immediate() {
        let handle = ShutdownHandle::new();
        handle.signal();
        tokio::time::timeout(Duration::from_millis(50), handle.wait())
            .await
            .expect("already signaled");
    }

    #[test]
    fn second_signal_reports_false() {
        let handle = ShutdownHandle::new();
        assert!(handle.signal());
        assert!(!handle.signal());
        assert!(handle.is_shutting_down());
    }
}
