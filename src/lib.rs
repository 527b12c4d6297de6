//! # feedmux
//!
//! **Feedmux** is a small library for sharing one expensive background data
//! feed among many consumers.
//!
//! It provides a reference-counted broadcast channel that owns a producer's
//! lifecycle (first subscriber starts it, last unsubscribe stops it), an
//! optional replay cache for late joiners, and a standalone pacing stage that
//! slows a bursty stream down to a bounded delivery rate without dropping
//! values.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                 ┌────────────────────┐
//!                 │  FeedSource (e.g.  │   start() on first subscribe
//!                 │  CounterTicker)    │   stop() on last unsubscribe
//!                 └─────────┬──────────┘
//!                           │ FeedSink::push(value)
//!                           ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  SharedFeed (reference-counted broadcast channel)                 │
//! │  - Lifecycle mutex (serializes episode start/stop)                │
//! │  - Delivery pump (one per episode, preserves emission order)      │
//! │  - ReplayCache (last N values, scoped to the episode)             │
//! │  - SinkSet (per-consumer FIFO queues + workers)                   │
//! └──────┬──────────────────────┬──────────────────────┬──────────────┘
//!        ▼                      ▼                      ▼
//!   consumer A             consumer B             FeedStream ──► RateLimiter
//!  (ConsumerFn)           (custom Consume)              (paced consumer)
//! ```
//!
//! ### Episode lifecycle
//! ```text
//! subscribe():
//!   ├─► set was empty?
//!   │     ├─► reset ReplayCache (fresh episode, empty buffer)
//!   │     ├─► spawn pump
//!   │     └─► source.start(sink)    ── error ─► channel stays Idle,
//!   │                                           error returned to caller
//!   ├─► queue replay snapshot to the new consumer
//!   └─► return Subscription handle
//!
//! unsubscribe(handle):
//!   ├─► detach consumer (no-op if unknown handle)
//!   └─► set became empty?
//!         ├─► source.stop()   (awaited: resources released synchronously)
//!         ├─► cancel pump
//!         └─► reset ReplayCache, back to Idle
//!
//! close():
//!   └─► ends a running episode regardless of subscriber count,
//!       detaches everyone; further subscribes fail with FeedError::Closed
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits            |
//! |-----------------|----------------------------------------------------------|-------------------------------|
//! | **Channel**     | Reference-counted multiplexing of one owned producer.    | [`SharedFeed`], [`Subscription`] |
//! | **Replay**      | Last-N cache delivered to late subscribers, in order.    | [`ReplayCache`], [`FeedConfig`] |
//! | **Pacing**      | Queue + gate-deadline rate limiting, no value loss.      | [`RateLimiter`], [`PacedStream`] |
//! | **Sources**     | Stoppable background producers, plus a demo ticker.      | [`FeedSource`], [`CounterTicker`] |
//! | **Consumers**   | Delivery targets with per-consumer workers.              | [`Consume`], [`ConsumerFn`]   |
//! | **Errors**      | Typed errors for configuration and lifecycle failures.   | [`FeedError`], [`SourceError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogSink`] consumer _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use feedmux::{ConsumerFn, CounterTicker, FeedConfig, RateLimiter, SharedFeed};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // One ticker shared by everyone who subscribes; replay the latest
//!     // value to late joiners.
//!     let ticker = CounterTicker::arc(Duration::from_millis(500))?;
//!     let feed: SharedFeed<u64> = SharedFeed::new(ticker, FeedConfig::with_replay(1));
//!
//!     // Starting the episode: the first subscriber brings the ticker up.
//!     let sub = feed
//!         .subscribe(ConsumerFn::arc("printer", |v: &u64| println!("got a new {v}")))
//!         .await?;
//!
//!     // A paced view of the same feed: at most one value per second.
//!     let limiter = RateLimiter::new(Duration::from_secs(1))?;
//!     let mut paced = limiter.limit(feed.subscribe_stream().await?);
//!     for _ in 0..3 {
//!         if let Some(v) = paced.recv().await {
//!             println!("paced: {v}");
//!         }
//!     }
//!
//!     // Last unsubscribe stops the ticker and ends the episode.
//!     feed.unsubscribe(&sub).await;
//!     feed.close().await;
//!     Ok(())
//! }
//! ```

mod channel;
mod config;
mod consumers;
mod error;
mod pace;
mod sources;

// ---- Public re-exports ----

pub use channel::{FeedStream, ReplayCache, SharedFeed, Subscription};
pub use config::FeedConfig;
pub use consumers::{Consume, ConsumerFn, ConsumerRef};
pub use error::{FeedError, SourceError};
pub use pace::{PacedStream, RateLimiter};
pub use sources::{CounterTicker, FeedSink, FeedSource, SourceRef};

// Optional: expose a simple built-in stdout consumer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use consumers::LogSink;
