//! # Feed sources: the producers a channel owns.
//!
//! A source is an expensive background producer (a websocket, a polling
//! loop, a market-data connection) that knows how to [`start`](FeedSource::start)
//! and [`stop`](FeedSource::stop) itself and pushes values through a
//! [`FeedSink`] while running. The [`SharedFeed`](crate::channel::SharedFeed)
//! drives exactly one start/stop cycle per connection episode; a source never
//! observes overlapping starts.
//!
//! [`CounterTicker`] is the bundled demo source: a strictly increasing
//! counter emitted once per fixed interval.

mod source;
mod ticker;

pub use source::{FeedSink, FeedSource, SourceRef};
pub use ticker::CounterTicker;
