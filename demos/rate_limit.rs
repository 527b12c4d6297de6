//! # Rate limit demo
//!
//! A fast ticker (one value per 500ms) paced down to one delivery per
//! second. Halfway through, the underlying subscription is killed; the
//! values already queued inside the limiter keep pacing out.
//!
//! ## Run
//! ```bash
//! cargo run --example rate_limit
//! ```

use std::time::Duration;

use feedmux::{CounterTicker, FeedConfig, RateLimiter, SharedFeed};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("starting program...");

    let ticker = CounterTicker::arc(Duration::from_millis(500))?;
    let feed: SharedFeed<u64> = SharedFeed::new(ticker, FeedConfig::default());

    println!("starting underlying subscription");
    let upstream = feed.subscribe_stream().await?;
    let sub = upstream.subscription().clone();

    let limiter = RateLimiter::new(Duration::from_secs(1))?;
    let mut paced = limiter.limit(upstream);

    let listener = tokio::spawn(async move {
        while let Some(v) = paced.recv().await {
            println!("listener: got a new {v}");
        }
        println!("paced stream ended");
    });

    tokio::time::sleep(Duration::from_secs(5)).await;

    println!("killing underlying subscription");
    feed.unsubscribe(&sub).await;

    println!("waiting for rate limited items to come in");
    listener.await?;

    feed.close().await;
    Ok(())
}
