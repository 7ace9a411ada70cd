//! Hand-off mailboxes between pipeline stages.
//!
//! A mailbox is a bounded FIFO that moves ownership of a transaction from one
//! stage to the next. With the default capacity of one, a producer cannot get
//! more than one transaction ahead of its consumer.

use tokio::sync::mpsc;

use crate::common::error::{HarnessError, HarnessResult};

/// Creates a mailbox with the given capacity.
///
/// # Panics
///
/// Panics if `capacity` is zero; [`crate::config::Config::validate`] rejects
/// that value before any mailbox is built.
pub fn mailbox<T>(name: &'static str, capacity: usize) -> (MailboxTx<T>, MailboxRx<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (MailboxTx { name, tx }, MailboxRx { rx })
}

/// Producer end of a mailbox.
#[derive(Debug)]
pub struct MailboxTx<T> {
    name: &'static str,
    tx: mpsc::Sender<T>,
}

impl<T> MailboxTx<T> {
    /// Enqueues `item`, suspending while the mailbox is full.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MailboxClosed`] if the consumer is gone.
    pub async fn put(&self, item: T) -> HarnessResult<()> {
        self.tx
            .send(item)
            .await
            .map_err(|_| HarnessError::MailboxClosed(self.name))
    }
}

/// Consumer end of a mailbox.
#[derive(Debug)]
pub struct MailboxRx<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> MailboxRx<T> {
    /// Dequeues the oldest item, suspending while the mailbox is empty.
    ///
    /// Returns `None` once the producer is gone and the mailbox is drained.
    pub async fn get(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}
