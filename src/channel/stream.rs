//! # Stream-shaped subscription.
//!
//! [`FeedStream`] adapts a [`SharedFeed`] subscription into a
//! [`futures::Stream`], which is the shape the
//! [`RateLimiter`](crate::pace::RateLimiter) consumes. The forwarding
//! consumer clones each value into an unbounded channel, so the stream
//! inherits the channel's ordering and no-loss guarantees.
//!
//! Dropping the stream does **not** unsubscribe (unsubscribing stops the
//! source and is an async operation); call
//! [`SharedFeed::unsubscribe`] with [`FeedStream::subscription`] explicitly.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use tokio::sync::mpsc;

use crate::channel::{SharedFeed, Subscription};
use crate::consumers::Consume;
use crate::error::FeedError;

/// A subscription delivered as a `futures::Stream`.
pub struct FeedStream<T> {
    rx: mpsc::UnboundedReceiver<T>,
    subscription: Subscription,
}

impl<T> FeedStream<T> {
    /// Handle for unsubscribing this stream from its channel.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// Receives the next value, or `None` once detached and drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

impl<T> Stream for FeedStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}

/// Consumer that forwards values into the stream's channel.
struct Forwarder<T> {
    tx: mpsc::UnboundedSender<T>,
}

#[async_trait]
impl<T> Consume<T> for Forwarder<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn on_value(&self, value: &T) {
        // Receiver dropped means the stream is gone; nothing to forward to.
        let _ = self.tx.send(value.clone());
    }

    fn name(&self) -> &str {
        "feed-stream"
    }
}

impl<T: Clone + Send + Sync + 'static> SharedFeed<T> {
    /// Subscribes and exposes the delivery as a [`FeedStream`].
    ///
    /// Follows the same episode rules as
    /// [`subscribe`](SharedFeed::subscribe): the first stream starts the
    /// source, and the replay snapshot (if configured) is delivered ahead of
    /// live values.
    pub async fn subscribe_stream(&self) -> Result<FeedStream<T>, FeedError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(Arc::new(Forwarder { tx })).await?;
        Ok(FeedStream { rx, subscription })
    }
}
