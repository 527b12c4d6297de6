//! # Source abstraction and the sink handle it emits through.
//!
//! This module defines the [`FeedSource`] trait (async, stoppable) and the
//! [`FeedSink`] handle a source pushes values into while running. The common
//! handle type is [`SourceRef`], an `Arc<dyn FeedSource<T>>` suitable for
//! sharing with a channel.
//!
//! ## Lifecycle contract
//! ```text
//! Idle ── start(sink) ──► Running ── stop() ──► Idle
//! ```
//! - `start` is only called while the source is stopped; the channel
//!   serializes episode transitions, so implementations never see
//!   overlapping starts.
//! - `stop` is idempotent and returns only after the producer has fully
//!   halted and released its timer/connection. Nothing may be emitted after
//!   `stop` returns.
//! - Emission happens by calling [`FeedSink::push`] from whatever task the
//!   source runs internally.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::SourceError;

/// Shared handle to a source, as held by a channel.
pub type SourceRef<T> = Arc<dyn FeedSource<T>>;

/// Outbound handle a running source emits values through.
///
/// Cheap to clone; all clones feed the same episode. Pushing after the
/// episode has been torn down is a no-op (reported through the return value).
#[derive(Debug)]
pub struct FeedSink<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for FeedSink<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> FeedSink<T> {
    /// Creates a sink together with the receiving end the channel pump drains.
    pub(crate) fn pair() -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Pushes one value into the feed.
    ///
    /// Returns `false` if the episode is already torn down; a source may use
    /// that as a hint to wind down early.
    pub fn push(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// # An owned, stoppable background producer.
///
/// A `FeedSource` has a stable [`name`](FeedSource::name), an async
/// [`start`](FeedSource::start) that brings the producer up, and an async
/// [`stop`](FeedSource::stop) that halts it and releases its resources.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use feedmux::{FeedSink, FeedSource, SourceError};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl FeedSource<u64> for Fixed {
///     fn name(&self) -> &str { "fixed" }
///
///     async fn start(&self, out: FeedSink<u64>) -> Result<(), SourceError> {
///         out.push(42);
///         Ok(())
///     }
///
///     async fn stop(&self) {}
/// }
/// ```
#[async_trait]
pub trait FeedSource<T>: Send + Sync + 'static {
    /// Returns a stable, human-readable source name.
    fn name(&self) -> &str;

    /// Begins emission into `out`.
    ///
    /// Returns once the producer is up; values may start flowing before or
    /// after that point, but only while the source is running. Must not be
    /// called while already started (the channel guarantees this).
    async fn start(&self, out: FeedSink<T>) -> Result<(), SourceError>;

    /// Halts emission and releases any timer/resource. Idempotent.
    ///
    /// Returns only after the producer has fully terminated: no value may be
    /// pushed after `stop` returns.
    async fn stop(&self);
}
