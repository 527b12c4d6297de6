//! # Shared feed demo
//!
//! One expensive ticker shared through a reference-counted channel:
//! subscribing starts it, unsubscribing stops it, resubscribing opens a
//! fresh episode (the counter keeps its value across episodes).
//!
//! ## Run
//! ```bash
//! cargo run --example shared_feed
//! ```

use std::time::Duration;

use feedmux::{ConsumerFn, CounterTicker, FeedConfig, SharedFeed};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ticker = CounterTicker::arc(Duration::from_millis(500))?;
    let feed: SharedFeed<u64> = SharedFeed::new(ticker, FeedConfig::default());

    println!("subscribing (first subscriber starts the ticker)");
    let sub = feed
        .subscribe(ConsumerFn::arc("first", |v: &u64| {
            println!("got a new {v}");
        }))
        .await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    println!("disposing subscription (last subscriber stops the ticker)");
    feed.unsubscribe(&sub).await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("resubscribing (fresh episode; the counter continues)");
    let sub = feed
        .subscribe(ConsumerFn::arc("second", |v: &u64| {
            println!("got a new2 {v}");
        }))
        .await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    println!("disposing subscription");
    feed.unsubscribe(&sub).await;
    feed.close().await;
    Ok(())
}
