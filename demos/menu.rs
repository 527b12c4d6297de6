//! # Demo menu
//!
//! Console bootstrapper: a statically declared table of demos, picked by
//! number. On a demo error the message is printed and the menu waits for
//! Enter before listing again.
//!
//! ## Run
//! ```bash
//! cargo run --example menu
//! ```

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use feedmux::{ConsumerFn, CounterTicker, FeedConfig, RateLimiter, SharedFeed};

struct DemoEntry {
    name: &'static str,
    run: fn() -> BoxFuture<'static, anyhow::Result<()>>,
}

static DEMOS: &[DemoEntry] = &[
    DemoEntry {
        name: "shared_feed",
        run: run_shared_feed,
    },
    DemoEntry {
        name: "replay",
        run: run_replay,
    },
    DemoEntry {
        name: "rate_limit",
        run: run_rate_limit,
    },
];

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    loop {
        println!();
        println!("Program modes:");
        println!();
        for (i, demo) in DEMOS.iter().enumerate() {
            println!("{}. {}", i + 1, demo.name);
        }
        println!("q. quit");
        println!();
        println!("Make a selection:");

        let Some(line) = read_line().await? else {
            return Ok(());
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let selected = match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= DEMOS.len() => &DEMOS[n - 1],
            _ => continue,
        };

        println!();
        if let Err(err) = (selected.run)().await {
            println!("{err}");
            println!("Press Enter to continue");
            if read_line().await?.is_none() {
                return Ok(());
            }
        }
    }
}

/// Reads one line from stdin without blocking the runtime; `None` on EOF.
async fn read_line() -> anyhow::Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut buf = String::new();
        let read = std::io::stdin().read_line(&mut buf)?;
        Ok(if read == 0 { None } else { Some(buf) })
    })
    .await?
}

fn run_shared_feed() -> BoxFuture<'static, anyhow::Result<()>> {
    shared_feed().boxed()
}

fn run_replay() -> BoxFuture<'static, anyhow::Result<()>> {
    replay().boxed()
}

fn run_rate_limit() -> BoxFuture<'static, anyhow::Result<()>> {
    rate_limit().boxed()
}

/// Subscribe, unsubscribe, resubscribe: the ticker starts and stops with the
/// subscriber count, and the counter survives across episodes.
async fn shared_feed() -> anyhow::Result<()> {
    let ticker = CounterTicker::arc(Duration::from_millis(500))?;
    let feed: SharedFeed<u64> = SharedFeed::new(ticker, FeedConfig::default());

    println!("subscribing (starts the ticker)");
    let sub = feed
        .subscribe(ConsumerFn::arc("first", |v: &u64| println!("got a new {v}")))
        .await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    println!("disposing subscription (stops the ticker)");
    feed.unsubscribe(&sub).await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("resubscribing (fresh episode; the counter continues)");
    let sub = feed
        .subscribe(ConsumerFn::arc("second", |v: &u64| println!("got a new2 {v}")))
        .await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    println!("disposing subscription");
    feed.unsubscribe(&sub).await;
    feed.close().await;
    Ok(())
}

/// Late subscriber on a replay-1 channel receives the cached value at once.
async fn replay() -> anyhow::Result<()> {
    let ticker = CounterTicker::arc(Duration::from_millis(400))?;
    let feed: SharedFeed<u64> = SharedFeed::new(ticker, FeedConfig::with_replay(1));

    println!("first subscriber joins (starts the ticker)");
    let a = feed
        .subscribe(ConsumerFn::arc("early", |v: &u64| println!("early got {v}")))
        .await?;
    tokio::time::sleep(Duration::from_millis(1500)).await;

    println!("late subscriber joins; replay hands it the latest value at once");
    let b = feed
        .subscribe(ConsumerFn::arc("late", |v: &u64| println!("late got {v}")))
        .await?;
    tokio::time::sleep(Duration::from_millis(1200)).await;

    feed.unsubscribe(&a).await;
    feed.unsubscribe(&b).await;
    feed.close().await;
    Ok(())
}

/// Fast producer paced to one delivery per second; killing the upstream does
/// not lose the values already queued inside the limiter.
async fn rate_limit() -> anyhow::Result<()> {
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
