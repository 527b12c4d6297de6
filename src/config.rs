//! # Channel configuration.
//!
//! Provides [`FeedConfig`], the per-channel settings consumed by
//! [`SharedFeed::new`](crate::channel::SharedFeed::new).
//!
//! ## Sentinel values
//! - `replay = 0` → replay disabled (late subscribers see only live values)

/// Configuration for a [`SharedFeed`](crate::channel::SharedFeed) channel.
///
/// ## Field semantics
/// - `replay`: number of most-recent values retained for delivery to
///   subscribers that join mid-episode (`0` = disabled). The buffer is scoped
///   to one connection episode: it is emptied every time the channel starts a
///   fresh episode.
///
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Copy, Debug)]
pub struct FeedConfig {
    /// Replay capacity: how many of the most recent values a late subscriber
    /// receives at subscribe time, ahead of any live emission.
    ///
    /// - `0` = no replay
    /// - `n > 0` = the last `n` values, oldest first
    pub replay: usize,
}

impl FeedConfig {
    /// Returns a config with replay capacity `n`.
    pub fn with_replay(n: usize) -> Self {
        Self { replay: n }
    }

    /// True if a replay buffer is kept for this channel.
    #[inline]
    pub fn replay_enabled(&self) -> bool {
        self.replay > 0
    }
}

impl Default for FeedConfig {
    /// Default configuration: `replay = 0` (no replay buffer).
    fn default() -> Self {
        Self { replay: 0 }
    }
}
