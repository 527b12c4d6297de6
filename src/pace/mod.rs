//! # Pacing: bursty-to-paced stream translation.
//!
//! [`RateLimiter`] wraps any `futures::Stream` and enforces a minimum spacing
//! between consecutive deliveries without dropping values. It is
//! source-agnostic: it never starts or stops the upstream, so it composes
//! with [`SharedFeed`](crate::channel::SharedFeed) but does not depend on it —
//! a limiter keeps draining its queue even after the upstream connection has
//! been torn down.

mod limiter;
mod paced;

pub use limiter::RateLimiter;
pub use paced::PacedStream;
