//! Write-behind persistence for one storage key.
//!
//! State changes are applied in memory first and then handed to a
//! [`Flusher`], which writes them from a background task. Bursts of
//! updates coalesce into one write of the latest value, and a value equal
//! to the last one written is skipped. A failed write is reported through
//! [`Notices`] and never rolls back the in-memory state.

use crate::notice::{Notice, Notices};
use flashcarder_storage::Storage;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum Command<T> {
    Write(T),
    Barrier(oneshot::Sender<()>),
}

/// Handle to a background writer for a single key.
pub struct Flusher<T> {
    key: &'static str,
    tx: mpsc::UnboundedSender<Command<T>>,
}

impl<T> Flusher<T>
where
    T: Serialize + PartialEq + Send + Sync + 'static,
{
    /// Spawn the writer task.
    ///
    /// `stored` is the value currently in storage, if known, so an
    /// unchanged value is not written back.
    pub fn spawn<S>(storage: Arc<S>, key: &'static str, stored: Option<T>, notices: Notices) -> Self
    where
        S: Storage + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::run(storage, key, stored, notices, rx));
        Self { key, tx }
    }

    /// Queue `value` to be written.
    pub fn schedule(&self, value: T) {
        if self.tx.send(Command::Write(value)).is_err() {
            warn!(key = self.key, "Flusher stopped, dropping write");
        }
    }

    /// Wait until every value scheduled before this call was written (or
    /// failed to write).
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(Command::Barrier(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    async fn run<S: Storage>(
        storage: Arc<S>,
        key: &'static str,
        mut last: Option<T>,
        notices: Notices,
        mut rx: mpsc::UnboundedReceiver<Command<T>>,
    ) {
        while let Some(first) = rx.recv().await {
            let mut pending = None;
            let mut barriers = Vec::new();

            let mut next = Some(first);
            while let Some(command) = next {
                match command {
                    Command::Write(value) => pending = Some(value),
                    Command::Barrier(done) => barriers.push(done),
                }
                next = rx.try_recv().ok();
            }

            if let Some(value) = pending {
                if last.as_ref() == Some(&value) {
                    debug!(key, "Value unchanged, skipping write");
                } else {
                    match storage.write(key, &value).await {
                        Ok(()) => {
                            debug!(key, "Flushed");
                            last = Some(value);
                        }
                        Err(e) => {
                            warn!(key, error = %e, "Write failed");
                            notices.publish(Notice::storage_write_failed(key, &e));
                        }
                    }
                }
            }

            for done in barriers {
                let _ = done.send(());
            }
        }
        debug!(key, "Flusher stopped");
    }
}
