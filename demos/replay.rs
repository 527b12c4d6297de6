//! # Replay demo
//!
//! A channel configured with replay capacity 1: a subscriber joining
//! mid-episode receives the latest value immediately, then live values.
//!
//! ## Run
//! ```bash
//! cargo run --example replay --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use feedmux::{ConsumerFn, CounterTicker, FeedConfig, LogSink, SharedFeed};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ticker = CounterTicker::arc(Duration::from_millis(400))?;
    let feed: SharedFeed<u64> = SharedFeed::new(ticker, FeedConfig::with_replay(1));

    println!("first subscriber joins (starts the ticker)");
    let a = feed.subscribe(Arc::new(LogSink)).await?;
    tokio::time::sleep(Duration::from_millis(1500)).await;

    println!("late subscriber joins; replay hands it the latest value at once");
    let b = feed
        .subscribe(ConsumerFn::arc("late", |v: &u64| {
            println!("late got {v}");
        }))
        .await?;
    tokio::time::sleep(Duration::from_millis(1200)).await;

    feed.unsubscribe(&a).await;
    feed.unsubscribe(&b).await;
    feed.close().await;
    Ok(())
}
