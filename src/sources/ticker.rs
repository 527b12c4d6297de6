//! # CounterTicker: interval-driven counter source.
//!
//! [`CounterTicker`] simulates a background data feed: once started it emits a
//! strictly increasing `u64` once per fixed interval until stopped. Think of
//! it as a stand-in for a websocket or a polling fetcher.
//!
//! The next value is computed synchronously at the tick, so emission cadence
//! is never skewed by slow per-tick work. The counter survives stop/start
//! cycles: a fresh episode continues the count rather than restarting at
//! zero.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{FeedError, SourceError};
use crate::sources::{FeedSink, FeedSource};

/// Running state of the ticker: the emission task and its stop signal.
struct Running {
    token: CancellationToken,
    join: JoinHandle<()>,
}

/// Interval-driven counter source (demo producer).
///
/// Emits `0, 1, 2, ...` once per `interval`. The counter is shared across
/// episodes, so stopping and restarting the ticker continues the sequence.
pub struct CounterTicker {
    interval: Duration,
    counter: Arc<AtomicU64>,
    running: Mutex<Option<Running>>,
}

impl CounterTicker {
    /// Creates a ticker emitting once per `interval`.
    ///
    /// Returns [`FeedError::InvalidInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, FeedError> {
        if interval.is_zero() {
            return Err(FeedError::InvalidInterval { interval });
        }
        Ok(Self {
            interval,
            counter: Arc::new(AtomicU64::new(0)),
            running: Mutex::new(None),
        })
    }

    /// Creates the ticker and returns it as a shared handle.
    pub fn arc(interval: Duration) -> Result<Arc<Self>, FeedError> {
        Self::new(interval).map(Arc::new)
    }

    /// Next value the ticker would emit.
    pub fn count(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FeedSource<u64> for CounterTicker {
    fn name(&self) -> &str {
        "counter-ticker"
    }

    async fn start(&self, out: FeedSink<u64>) -> Result<(), SourceError> {
        let mut slot = self.running.lock().await;
        if slot.is_some() {
            return Err(SourceError::AlreadyStarted);
        }

        debug!("{}: starting (interval {:?})", self.name(), self.interval);

        let interval = self.interval;
        let counter = Arc::clone(&self.counter);
        let token = CancellationToken::new();
        let child = token.clone();

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {
                        let next = counter.fetch_add(1, Ordering::Relaxed);
                        debug!("counter-ticker: fetched {next}");
                        if !out.push(next) {
                            // Episode torn down underneath us; wind down.
                            break;
                        }
                    }
                }
            }
        });

        *slot = Some(Running { token, join });
        Ok(())
    }

    async fn stop(&self) {
        let taken = self.running.lock().await.take();
        if let Some(running) = taken {
            running.token.cancel();
            let _ = running.join.await;
            debug!("{}: stopped", self.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_interval() {
        let err = match CounterTicker::new(Duration::ZERO) {
            Err(e) => e,
            Ok(_) => panic!("zero interval must be rejected"),
        };
        assert_eq!(err.as_label(), "invalid_interval");
    }

    #[tokio::test(start_paused = true)]
    async fn emits_increasing_counter_on_interval() {
        let ticker = CounterTicker::new(Duration::from_secs(1)).unwrap();
        let (sink, mut rx) = FeedSink::pair();

        ticker.start(sink).await.unwrap();
        assert_eq!(rx.recv().await, Some(0));
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn counter_survives_restart() {
        let ticker = CounterTicker::new(Duration::from_secs(1)).unwrap();

        let (sink, mut rx) = FeedSink::pair();
        ticker.start(sink).await.unwrap();
        assert_eq!(rx.recv().await, Some(0));
        ticker.stop().await;

        let (sink, mut rx) = FeedSink::pair();
        ticker.start(sink).await.unwrap();
        assert_eq!(rx.recv().await, Some(1));
        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_is_rejected() {
        let ticker = CounterTicker::new(Duration::from_secs(1)).unwrap();

        let (sink, _rx) = FeedSink::pair();
        ticker.start(sink).await.unwrap();

        let (sink, _rx2) = FeedSink::pair();
        let err = ticker.start(sink).await.unwrap_err();
        assert_eq!(err.as_label(), "source_already_started");
        ticker.stop().await;
    }

    #[tokio::test]
    async fn stop_without_start_is_a_noop() {
        let ticker = CounterTicker::new(Duration::from_secs(1)).unwrap();
        ticker.stop().await;
        ticker.stop().await;
    }
}
