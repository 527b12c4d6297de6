//! # SharedFeed: reference-counted broadcast channel over one owned source.
//!
//! [`SharedFeed`] multiplexes a single expensive producer to any number of
//! consumers and owns the producer's lifecycle: the first subscriber starts
//! it, the last unsubscribe stops it.
//!
//! ## Episode lifecycle
//! ```text
//!            subscribe (set was empty)
//!   Idle ───────────────────────────────► Running
//!    ▲      reset replay, spawn pump,        │
//!    │      source.start(sink)               │ unsubscribe (set becomes empty)
//!    │                                       │ source.stop(), cancel pump,
//!    └───────────────────────────────────────┘ reset replay
//!
//!   close(): from any phase ──► Closed (stops a running episode first;
//!            further subscribes fail with FeedError::Closed)
//! ```
//!
//! ## Delivery path
//! ```text
//!   source task ── FeedSink::push(v) ──► pump ──► lock registry:
//!                                                   replay.record(v)
//!                                                   SinkSet::broadcast(v)
//!                                                        │
//!                                             per-consumer FIFO queues
//! ```
//!
//! ## Guarantees
//! - Episode transitions are serialized by one async mutex: concurrent
//!   subscribe/unsubscribe calls can never double-start the source, nor stop
//!   it while another subscriber is still attaching.
//! - The single pump task hands values to consumer queues in emission order,
//!   so every consumer sees the exact subsequence emitted while it was
//!   attached — in order, no gaps, no duplicates.
//! - A mid-episode subscriber has the replay snapshot queued ahead of any
//!   live value, under the same lock the pump delivers under.
//! - `stop()` is awaited before the episode is torn down, so the producer's
//!   resources are released synchronously with the last unsubscribe.

use std::sync::Arc;

use log::debug;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::channel::ReplayCache;
use crate::config::FeedConfig;
use crate::consumers::{ConsumerRef, SinkSet};
use crate::error::FeedError;
use crate::sources::{FeedSink, FeedSource, SourceRef};

/// Opaque handle identifying one subscription, used to unsubscribe.
///
/// Clones refer to the same subscription; unsubscribing is idempotent, so a
/// stale clone is harmless.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    /// Numeric id of this subscription (unique per channel).
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Channel phase; `Running` iff the consumer set is non-empty (and the
/// channel has not been closed).
enum Phase {
    Idle,
    Running,
    Closed,
}

/// One connection episode: the delivery pump and its stop signal.
struct Episode {
    token: CancellationToken,
    pump: JoinHandle<()>,
}

/// Episode state, guarded by the lifecycle mutex.
struct Lifecycle {
    phase: Phase,
    episode: Option<Episode>,
}

/// Consumer set and replay buffer, shared between the API and the pump.
struct Registry<T> {
    consumers: SinkSet<T>,
    replay: ReplayCache<Arc<T>>,
    next_id: u64,
}

struct FeedInner<T> {
    source: SourceRef<T>,
    lifecycle: Mutex<Lifecycle>,
    registry: Arc<Mutex<Registry<T>>>,
}

/// Reference-counted broadcast channel over one owned [`FeedSource`](crate::sources::FeedSource).
///
/// Cheap to clone; all clones share the same channel state.
///
/// ## Example
/// ```no_run
/// use std::time::Duration;
/// use feedmux::{ConsumerFn, CounterTicker, FeedConfig, SharedFeed};
///
/// # async fn demo() -> Result<(), feedmux::FeedError> {
/// let ticker = CounterTicker::arc(Duration::from_secs(1))?;
/// let feed: SharedFeed<u64> = SharedFeed::new(ticker, FeedConfig::with_replay(1));
///
/// // First subscribe starts the ticker.
/// let sub = feed.subscribe(ConsumerFn::arc("printer", |v: &u64| {
///     println!("got a new {v}");
/// })).await?;
///
/// // Last unsubscribe stops it again.
/// feed.unsubscribe(&sub).await;
/// # Ok(())
/// # }
/// ```
pub struct SharedFeed<T> {
    inner: Arc<FeedInner<T>>,
}

impl<T> Clone for SharedFeed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> SharedFeed<T> {
    /// Creates a channel owning `source`, configured by `cfg`.
    ///
    /// The source is not started until the first subscriber arrives.
    pub fn new(source: SourceRef<T>, cfg: FeedConfig) -> Self {
        Self {
            inner: Arc::new(FeedInner {
                source,
                lifecycle: Mutex::new(Lifecycle {
                    phase: Phase::Idle,
                    episode: None,
                }),
                registry: Arc::new(Mutex::new(Registry {
                    consumers: SinkSet::new(),
                    replay: ReplayCache::new(cfg.replay),
                    next_id: 0,
                })),
            }),
        }
    }

    /// Registers `consumer` for delivery of all future emissions.
    ///
    /// If the consumer set was empty, this opens a new connection episode:
    /// the replay buffer is reset and the source is started before the call
    /// returns. A start failure leaves the channel idle and is returned to
    /// this caller.
    ///
    /// Mid-episode, the replay snapshot (if configured) is queued to the new
    /// consumer ahead of any subsequently emitted value.
    pub async fn subscribe(&self, consumer: ConsumerRef<T>) -> Result<Subscription, FeedError> {
        let mut life = self.inner.lifecycle.lock().await;
        match life.phase {
            Phase::Closed => return Err(FeedError::Closed),
            Phase::Running => {}
            Phase::Idle => {
                {
                    let mut reg = self.inner.registry.lock().await;
                    reg.replay.reset();
                }

                let (sink, rx) = FeedSink::pair();
                let token = CancellationToken::new();
                let pump = tokio::spawn(pump(rx, Arc::clone(&self.inner.registry), token.clone()));

                if let Err(err) = self.inner.source.start(sink).await {
                    token.cancel();
                    let _ = pump.await;
                    debug!(
                        "feed '{}': start failed ({})",
                        self.inner.source.name(),
                        err
                    );
                    return Err(err.into());
                }

                debug!("feed '{}': episode started", self.inner.source.name());
                life.phase = Phase::Running;
                life.episode = Some(Episode { token, pump });
            }
        }

        let id = {
            let mut reg = self.inner.registry.lock().await;
            let id = reg.next_id;
            reg.next_id += 1;
            let backlog = reg.replay.snapshot();
            reg.consumers.attach(id, consumer, backlog);
            id
        };
        Ok(Subscription { id })
    }

    /// Removes the subscriber identified by `sub`.
    ///
    /// Idempotent: returns `false` if the handle is not currently registered
    /// (already unsubscribed, or detached by [`close`](SharedFeed::close)).
    /// If the consumer set becomes empty, the source is stopped — awaited to
    /// completion — the pump is cancelled, the replay buffer is discarded,
    /// and the channel returns to idle.
    pub async fn unsubscribe(&self, sub: &Subscription) -> bool {
        let mut life = self.inner.lifecycle.lock().await;
        let (removed, now_empty) = {
            let mut reg = self.inner.registry.lock().await;
            let removed = reg.consumers.detach(sub.id);
            (removed, reg.consumers.is_empty())
        };

        if removed && now_empty && matches!(life.phase, Phase::Running) {
            self.end_episode(&mut life).await;
        }
        removed
    }

    /// Forcibly ends any running episode and closes the channel.
    ///
    /// All consumers are detached regardless of count, the source is stopped,
    /// and subsequent [`subscribe`](SharedFeed::subscribe) calls fail with
    /// [`FeedError::Closed`]. Idempotent.
    ///
    /// This is the deterministic teardown for a feed that still has
    /// subscribers at shutdown; nothing is left for a collector to finalize.
    pub async fn close(&self) {
        let mut life = self.inner.lifecycle.lock().await;
        if matches!(life.phase, Phase::Closed) {
            return;
        }
        if matches!(life.phase, Phase::Running) {
            self.end_episode(&mut life).await;
        }
        {
            let mut reg = self.inner.registry.lock().await;
            reg.consumers.clear();
        }
        life.phase = Phase::Closed;
        debug!("feed '{}': closed", self.inner.source.name());
    }

    /// True while a connection episode is in flight.
    pub async fn is_running(&self) -> bool {
        matches!(self.inner.lifecycle.lock().await.phase, Phase::Running)
    }

    /// Number of currently attached consumers.
    pub async fn consumer_count(&self) -> usize {
        self.inner.registry.lock().await.consumers.len()
    }

    /// Stops the source, tears down the pump, and discards the replay buffer.
    ///
    /// Caller holds the lifecycle lock. The source is stopped first so no
    /// emission can race the teardown. Values still queued inside the pump
    /// are discarded with it: at this point the consumer set is empty or the
    /// channel is closing.
    async fn end_episode(&self, life: &mut Lifecycle) {
        self.inner.source.stop().await;
        if let Some(episode) = life.episode.take() {
            episode.token.cancel();
            let _ = episode.pump.await;
        }
        {
            let mut reg = self.inner.registry.lock().await;
            reg.replay.reset();
        }
        life.phase = Phase::Idle;
        debug!("feed '{}': episode ended", self.inner.source.name());
    }
}

/// Delivery pump: drains the source sink and fans values out.
///
/// One pump per episode. Recording into the replay buffer and broadcasting
/// happen under a single registry lock, so an attaching subscriber can never
/// observe a value both via replay and live.
async fn pump<T: Send + Sync + 'static>(
    mut rx: mpsc::UnboundedReceiver<T>,
    registry: Arc<Mutex<Registry<T>>>,
    token: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            next = rx.recv() => match next {
                Some(value) => {
                    let value = Arc::new(value);
                    let mut reg = registry.lock().await;
                    reg.replay.record(Arc::clone(&value));
                    reg.consumers.broadcast(value);
                }
                None => break,
            }
        }
    }
}
