//! Rendezvous signals between pipeline stages.
//!
//! Completion flows backward through the pipeline as one-shot notifications:
//! the driver tells the generator it has taken a transaction, the monitor
//! tells the driver it has observed the outputs, and the signal bus tells the
//! monitor that new inputs were committed.

use std::sync::Arc;

use tokio::sync::Notify;

/// One-shot, auto-clearing notification.
///
/// [`Rendezvous::signal`] releases exactly one [`Rendezvous::wait`]. If no task
/// is waiting, the signal is held until the next wait consumes it; repeated
/// signals without an intervening wait coalesce into one. Consumption happens
/// inside the wait, so a set can never be missed or observed twice.
#[derive(Clone, Debug, Default)]
pub struct Rendezvous {
    inner: Arc<Notify>,
}

impl Rendezvous {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the signal, waking one waiter.
    pub fn signal(&self) {
        self.inner.notify_one();
    }

    /// Suspends until the signal is set, then clears it.
    pub async fn wait(&self) {
        self.inner.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn signal_before_wait_is_held() {
        let done = Rendezvous::new();
        done.signal();
        tokio::time::timeout(Duration::from_nanos(1), done.wait())
            .await
            .expect("held signal should release the wait");
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_signals_coalesce() {
        let done = Rendezvous::new();
        done.signal();
        done.signal();
        done.wait().await;
        let second = tokio::time::timeout(Duration::from_nanos(10), done.wait()).await;
        assert!(second.is_err(), "a consumed signal must not release again");
    }

    #[tokio::test(start_paused = true)]
    async fn signal_wakes_waiting_task() {
        let done = Rendezvous::new();
        let waiter = {
            let done = done.clone();
            tokio::spawn(async move { done.wait().await })
        };
        tokio::task::yield_now().await;
        done.signal();
        waiter.await.unwrap();
    }
}
