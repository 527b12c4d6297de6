//! # RateLimiter: queue + gate-deadline pacing.
//!
//! The limiter maintains an unbounded FIFO queue and a **gate deadline** —
//! the earliest time the next value may be released. On arrival a value is
//! appended to the queue; whenever the queue is non-empty and the gate has
//! passed, the head is delivered and the gate advances to
//! `delivery + interval`. If the gate has not passed, the worker sleeps until
//! it does (the pending-release timer) while still accepting input.
//!
//! ```text
//!   input:  ──v0──v1──v2──v3──v4──►            (arrivals every 0.5s)
//!                 │queue│
//!   output: ──v0────v1────v2────v3────v4──►    (one per interval = 1s)
//! ```
//!
//! The translation is bursty-to-paced: a producer faster than the interval
//! accumulates queue depth that drains at exactly one value per interval; a
//! producer slower than the interval is passed through with no artificial
//! delay, because the gate is already open when each value arrives.
//!
//! Cancellation (dropping or cancelling the [`PacedStream`]) aborts the
//! pending timer and discards whatever is still queued — there is no flush
//! on stop.

use std::collections::VecDeque;
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::FeedError;
use crate::pace::paced::PacedStream;

/// Pacing stage enforcing a minimum spacing between deliveries.
///
/// ## Example
/// ```no_run
/// use std::time::Duration;
/// use futures::stream;
/// use feedmux::RateLimiter;
///
/// # async fn demo() -> Result<(), feedmux::FeedError> {
/// let limiter = RateLimiter::new(Duration::from_secs(1))?;
/// let mut paced = limiter.limit(stream::iter(0..5));
///
/// while let Some(v) = paced.recv().await {
///     println!("one per second: {v}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RateLimiter {
    interval: Duration,
}

impl RateLimiter {
    /// Creates a limiter spacing deliveries at least `interval` apart.
    ///
    /// Returns [`FeedError::InvalidInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, FeedError> {
        if interval.is_zero() {
            return Err(FeedError::InvalidInterval { interval });
        }
        Ok(Self { interval })
    }

    /// Configured minimum spacing.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wraps `input`, returning a stream that delivers every input value
    /// exactly once, in arrival order, with consecutive deliveries at least
    /// [`interval`](RateLimiter::interval) apart.
    ///
    /// The worker keeps draining queued values after the upstream ends;
    /// dropping the returned stream cancels the pending timer and discards
    /// the queue.
    pub fn limit<S>(&self, input: S) -> PacedStream<S::Item>
    where
        S: Stream + Send + 'static,
        S::Item: Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let worker = tokio::spawn(pace(input, tx, self.interval, token.clone()));
        PacedStream::new(rx, token, worker)
    }
}

/// Release loop: owns the queue and the gate deadline.
async fn pace<S>(
    input: S,
    tx: mpsc::UnboundedSender<S::Item>,
    interval: Duration,
    token: CancellationToken,
) where
    S: Stream + Send,
    S::Item: Send,
{
    tokio::pin!(input);
    let mut queue: VecDeque<S::Item> = VecDeque::new();
    let mut gate = Instant::now();
    let mut upstream_done = false;

    loop {
        // Release whatever the gate allows.
        if Instant::now() >= gate {
            if let Some(value) = queue.pop_front() {
                if tx.send(value).is_err() {
                    // Downstream gone: discard the rest of the queue.
                    return;
                }
                gate = Instant::now() + interval;
                continue;
            }
        }

        if queue.is_empty() {
            if upstream_done {
                return;
            }
            // Nothing to release; wait for input.
            tokio::select! {
                _ = token.cancelled() => return,
                item = input.next() => match item {
                    Some(value) => queue.push_back(value),
                    None => upstream_done = true,
                }
            }
        } else {
            // Queue non-empty but the gate has not passed: wait for the gate
            // deadline (the pending-release timer) or more input.
            tokio::select! {
                _ = token.cancelled() => return,
                _ = time::sleep_until(gate) => {}
                item = input.next(), if !upstream_done => match item {
                    Some(value) => queue.push_back(value),
                    None => upstream_done = true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_interval() {
        let err = match RateLimiter::new(Duration::ZERO) {
            Err(e) => e,
            Ok(_) => panic!("zero interval must be rejected"),
        };
        assert_eq!(err.as_label(), "invalid_interval");
    }

    #[test]
    fn exposes_its_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(250)).unwrap();
        assert_eq!(limiter.interval(), Duration::from_millis(250));
    }
}
