//! # Value consumers for a shared feed.
//!
//! This module provides the [`Consume`] trait — the delivery target a caller
//! registers with [`SharedFeed::subscribe`](crate::channel::SharedFeed::subscribe) —
//! together with the crate-internal [`SinkSet`] fan-out and two ready-made
//! implementations:
//!
//! - [`ConsumerFn`]: wraps a plain closure (the usual choice in demos/tests).
//! - `LogSink` (behind the `logging` feature): prints values to stdout.
//!
//! ## Architecture
//! ```text
//! Delivery flow:
//!   FeedSource ── push(value) ──► pump ──► SinkSet::broadcast(Arc<T>)
//!                                              │
//!                                   ┌──────────┼──────────┐
//!                                   ▼          ▼          ▼
//!                               [queue C1] [queue C2] [queue CN]
//!                                   │          │          │
//!                               worker C1  worker C2  worker CN
//!                                   │          │          │
//!                          c1.on_value(&v) ... cN.on_value(&v)
//! ```
//!
//! Each consumer is driven by a dedicated worker fed from an unbounded FIFO
//! queue, so a slow consumer never loses or reorders its own delivery and
//! never blocks the pump or other consumers. Panics inside a consumer are
//! caught and logged; the other consumers are unaffected.

mod consume;
mod consumer_fn;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use consume::{Consume, ConsumerRef};
pub use consumer_fn::ConsumerFn;

#[cfg(feature = "logging")]
pub use log::LogSink;

pub(crate) use set::SinkSet;
