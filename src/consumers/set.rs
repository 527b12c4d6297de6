//! # SinkSet: non-blocking fan-out over registered consumers
//!
//! [`SinkSet`] distributes each value to the currently attached consumers
//! **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `broadcast(Arc<T>)` returns immediately.
//! - Per-consumer FIFO (queue order), no loss while attached: queues are
//!   unbounded, so a slow consumer lags but never gaps.
//! - Panics inside consumers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No lockstep across consumers: each worker drains its own queue at its
//!   own pace.
//! - Values still queued when a consumer detaches are drained by its worker
//!   before the worker exits; they are not clawed back.

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use log::warn;
use tokio::sync::mpsc;

use super::{Consume, ConsumerRef};

/// Per-consumer channel with metadata.
///
/// The worker task is detached: dropping `sender` closes the queue, the
/// worker drains what is left and exits on its own.
struct ConsumerSlot<T> {
    name: String,
    sender: mpsc::UnboundedSender<Arc<T>>,
}

/// Fan-out over attached consumers, keyed by subscription id.
pub(crate) struct SinkSet<T> {
    slots: HashMap<u64, ConsumerSlot<T>>,
}

impl<T: Send + Sync + 'static> SinkSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Attaches a consumer under `id`, spawning its worker.
    ///
    /// `backlog` is queued ahead of any value broadcast after this call, so a
    /// replay snapshot is always observed before live emissions.
    pub(crate) fn attach(&mut self, id: u64, consumer: ConsumerRef<T>, backlog: Vec<Arc<T>>) {
        let name = consumer.name().to_string();
        let (tx, mut rx) = mpsc::unbounded_channel::<Arc<T>>();

        for value in backlog {
            // rx is still in scope, so the queue cannot be closed yet.
            let _ = tx.send(value);
        }

        tokio::spawn(async move {
            while let Some(value) = rx.recv().await {
                let fut = consumer.on_value(value.as_ref());
                if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    warn!(
                        "consumer '{}' panicked while handling a value: {panic_err:?}",
                        consumer.name()
                    );
                }
            }
        });

        self.slots.insert(id, ConsumerSlot { name, sender: tx });
    }

    /// Detaches the consumer registered under `id`.
    ///
    /// Returns `false` if no such consumer is attached (idempotent). The
    /// worker drains whatever is already queued and then exits.
    pub(crate) fn detach(&mut self, id: u64) -> bool {
        self.slots.remove(&id).is_some()
    }

    /// Fan-out one value to all attached consumers (non-blocking).
    pub(crate) fn broadcast(&self, value: Arc<T>) {
        for slot in self.slots.values() {
            if slot.sender.send(Arc::clone(&value)).is_err() {
                warn!("consumer '{}' dropped a value: worker closed", slot.name);
            }
        }
    }

    /// Detaches every consumer at once (channel teardown).
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// True if no consumers are attached.
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of attached consumers.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
