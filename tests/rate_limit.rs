//! Integration suite for the pacing stage: delivery timing, ordering,
//! drain-after-teardown, and cancellation. All suites run on the paused
//! clock, so timing assertions are deterministic.

mod common;

use std::time::Duration;

use futures::stream;
use tokio::sync::mpsc;
use tokio::time::Instant;

use feedmux::{FeedConfig, RateLimiter, SharedFeed};

use common::ScriptedSource;

/// Adapts an unbounded receiver into a `futures::Stream` without extra deps.
fn receiver_stream<T: Send + 'static>(
    rx: mpsc::UnboundedReceiver<T>,
) -> impl futures::Stream<Item = T> + Send {
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|v| (v, rx)) })
}

/// Asserts `elapsed` landed on `expected` (paused clock: exact up to
/// scheduling slack).
fn assert_at(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(50),
        "expected delivery at ~{expected:?}, got {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn paces_burst_to_one_per_interval() {
    let (tx, rx) = mpsc::unbounded_channel();

    // Arrivals at t = 0.0, 0.5, 1.0, 1.5, 2.0 with values 0..5.
    tokio::spawn(async move {
        for v in 0u64..5 {
            let _ = tx.send(v);
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    });

    let limiter = RateLimiter::new(Duration::from_secs(1)).unwrap();
    let mut paced = limiter.limit(receiver_stream(rx));

    let start = Instant::now();
    let mut deliveries = Vec::new();
    while let Some(v) = paced.recv().await {
        deliveries.push((v, start.elapsed()));
    }

    // Expected delivery times: 0, 1, 2, 3, 4 seconds, values in order.
    assert_eq!(deliveries.len(), 5);
    for (i, (value, at)) in deliveries.iter().enumerate() {
        assert_eq!(*value, i as u64);
        assert_at(*at, Duration::from_secs(i as u64));
    }
}

#[tokio::test(start_paused = true)]
async fn slow_producer_is_not_delayed() {
    let (tx, rx) = mpsc::unbounded_channel();

    // Arrivals at t = 0, 2, 4 seconds: slower than the 1s interval.
    tokio::spawn(async move {
        for v in 0u64..3 {
            let _ = tx.send(v);
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
    });

    let limiter = RateLimiter::new(Duration::from_secs(1)).unwrap();
    let mut paced = limiter.limit(receiver_stream(rx));

    let start = Instant::now();
    let mut deliveries = Vec::new();
    while let Some(v) = paced.recv().await {
        deliveries.push((v, start.elapsed()));
    }

    // The gate is already open on every arrival: no artificial delay.
    assert_eq!(deliveries.len(), 3);
    for (i, (value, at)) in deliveries.iter().enumerate() {
        assert_eq!(*value, i as u64);
        assert_at(*at, Duration::from_secs(2 * i as u64));
    }
}

#[tokio::test(start_paused = true)]
async fn keeps_draining_after_upstream_ends() {
    let limiter = RateLimiter::new(Duration::from_secs(1)).unwrap();
    // The whole input arrives instantly, then the upstream terminates.
    let mut paced = limiter.limit(stream::iter(0u64..5));

    let start = Instant::now();
    let mut deliveries = Vec::new();
    while let Some(v) = paced.recv().await {
        deliveries.push((v, start.elapsed()));
    }

    assert_eq!(deliveries.len(), 5, "queued values drain after upstream end");
    for (i, (value, at)) in deliveries.iter().enumerate() {
        assert_eq!(*value, i as u64);
        assert_at(*at, Duration::from_secs(i as u64));
    }
}

#[tokio::test(start_paused = true)]
async fn cancel_discards_queued_values() {
    let limiter = RateLimiter::new(Duration::from_secs(1)).unwrap();
    let mut paced = limiter.limit(stream::iter(0u64..100));

    assert_eq!(paced.recv().await, Some(0));
    paced.cancel();

    // No flush on stop: at most what was already released may still arrive.
    let mut leftovers = 0;
    while paced.recv().await.is_some() {
        leftovers += 1;
    }
    assert!(leftovers <= 1, "queue must be discarded, got {leftovers} extra");
}

#[tokio::test(start_paused = true)]
async fn shutdown_waits_for_the_worker() {
    let limiter = RateLimiter::new(Duration::from_secs(1)).unwrap();
    let paced = limiter.limit(stream::iter(0u64..100));
    // Returns only once the worker has observed cancellation and exited.
    paced.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn limiter_survives_feed_teardown() {
    let source = ScriptedSource::arc();
    let feed: SharedFeed<u64> = SharedFeed::new(source.clone(), FeedConfig::default());

    let upstream = feed.subscribe_stream().await.unwrap();
    let sub = upstream.subscription().clone();

    let limiter = RateLimiter::new(Duration::from_secs(1)).unwrap();
    let mut paced = limiter.limit(upstream);

    // A burst of three, then the feed connection is torn down.
    for v in 0..3 {
        assert!(source.emit(v));
    }
    let start = Instant::now();
    let first = paced.recv().await;
    assert_eq!(first, Some(0));

    feed.unsubscribe(&sub).await;
    assert_eq!(source.stops(), 1, "upstream source stopped");

    // Already-captured values keep pacing out after the teardown.
    let mut rest = Vec::new();
    while let Some(v) = paced.recv().await {
        rest.push((v, start.elapsed()));
    }
    assert_eq!(rest.iter().map(|(v, _)| *v).collect::<Vec<_>>(), vec![1, 2]);
    for (i, (_, at)) in rest.iter().enumerate() {
        assert_at(*at, Duration::from_secs(i as u64 + 1));
    }

    feed.close().await;
}
