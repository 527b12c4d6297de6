//! # PacedStream: the output side of a rate-limited stream.
//!
//! Yielded by [`RateLimiter::limit`](crate::pace::RateLimiter::limit).
//! Dropping the stream cancels the limiter's pending timer and discards any
//! values still queued; they are not retroactively delivered.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Rate-limited output stream.
///
/// Ends (`None`) once the upstream has terminated **and** the queue has fully
/// drained, or immediately after [`cancel`](PacedStream::cancel)/drop.
pub struct PacedStream<T> {
    rx: mpsc::UnboundedReceiver<T>,
    token: CancellationToken,
    worker: JoinHandle<()>,
}

impl<T> PacedStream<T> {
    pub(crate) fn new(
        rx: mpsc::UnboundedReceiver<T>,
        token: CancellationToken,
        worker: JoinHandle<()>,
    ) -> Self {
        Self { rx, token, worker }
    }

    /// Receives the next paced value, or `None` when the stream has ended.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Cancels the limiter: aborts the pending timer and discards the queue.
    ///
    /// Values already delivered are unaffected; values still queued are lost
    /// (no flush on stop).
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancels and waits for the limiter worker to finish.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        let _ = (&mut self.worker).await;
    }
}

impl<T> Stream for PacedStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> Drop for PacedStream<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
