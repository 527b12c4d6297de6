//! # Core consumer trait
//!
//! `Consume` is the extension point for plugging delivery targets into a
//! [`SharedFeed`](crate::channel::SharedFeed). Each registered consumer is
//! driven by a dedicated worker loop fed from an unbounded FIFO queue owned by
//! the channel.
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching) — they do **not** block the
//!   delivery pump nor other consumers.
//! - Values arrive in emission order, with no gaps and no duplicates, for the
//!   whole span the consumer is attached.
//! - A panic inside [`Consume::on_value`] is caught and logged; it neither
//!   kills the worker nor disturbs other consumers.

use async_trait::async_trait;
use std::sync::Arc;

/// Shared handle to a consumer, as stored by the channel.
pub type ConsumerRef<T> = Arc<dyn Consume<T>>;

/// Contract for feed consumers.
///
/// Called from a consumer-dedicated worker task. Implementations should avoid
/// blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Consume<T>: Send + Sync + 'static {
    /// Handle a single value from the feed.
    ///
    /// # Parameters
    /// - `value`: Reference to the value (does not transfer ownership)
    async fn on_value(&self, value: &T);

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
