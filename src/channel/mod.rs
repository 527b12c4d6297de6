//! # Channel core: reference-counted multiplexing with optional replay.
//!
//! The only mutating entry points are [`SharedFeed::subscribe`],
//! [`SharedFeed::unsubscribe`], and [`SharedFeed::close`]; everything else in
//! this module serves their contract.
//!
//! Internal modules:
//! - [`shared`]: episode lifecycle, delivery pump, subscription handles;
//! - [`replay`]: the bounded last-N buffer for late subscribers;
//! - [`stream`]: a subscription adapted to `futures::Stream` for composing
//!   with the pacing stage.

mod replay;
mod shared;
mod stream;

pub use replay::ReplayCache;
pub use shared::{SharedFeed, Subscription};
pub use stream::FeedStream;
