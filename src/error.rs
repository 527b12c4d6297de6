//! Error types used by the feed channel and the pacing stage.
//!
//! This module defines two main error enums:
//!
//! - [`FeedError`] — errors surfaced through the public channel/limiter API.
//! - [`SourceError`] — errors raised by [`FeedSource`](crate::sources::FeedSource)
//!   implementations while starting a producer.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//!
//! Note that unsubscribing a handle that is no longer registered is **not** an
//! error: [`SharedFeed::unsubscribe`](crate::channel::SharedFeed::unsubscribe)
//! treats it as a no-op and reports it through its return value.

use std::time::Duration;
use thiserror::Error;

/// # Errors surfaced through the public `feedmux` API.
///
/// These represent misconfiguration or lifecycle failures observed by callers
/// of the channel and the rate limiter.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FeedError {
    /// A pacing or emission interval of zero was supplied.
    #[error("interval must be greater than zero (got {interval:?})")]
    InvalidInterval {
        /// The rejected interval.
        interval: Duration,
    },

    /// The source failed to start; the channel remains idle and the error is
    /// returned to the subscriber that attempted to open the episode.
    #[error("source failed to start: {reason}")]
    SourceStart {
        /// The underlying start failure message.
        reason: String,
    },

    /// The channel was closed via [`SharedFeed::close`](crate::channel::SharedFeed::close);
    /// no further subscriptions are accepted.
    #[error("feed channel is closed")]
    Closed,
}

impl FeedError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use feedmux::FeedError;
    /// use std::time::Duration;
    ///
    /// let err = FeedError::InvalidInterval { interval: Duration::ZERO };
    /// assert_eq!(err.as_label(), "invalid_interval");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FeedError::InvalidInterval { .. } => "invalid_interval",
            FeedError::SourceStart { .. } => "source_start_failed",
            FeedError::Closed => "feed_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            FeedError::InvalidInterval { interval } => {
                format!("invalid interval: {interval:?}")
            }
            FeedError::SourceStart { reason } => format!("source start failed: {reason}"),
            FeedError::Closed => "channel closed".to_string(),
        }
    }
}

impl From<SourceError> for FeedError {
    fn from(err: SourceError) -> Self {
        FeedError::SourceStart {
            reason: err.to_string(),
        }
    }
}

/// # Errors produced by feed sources.
///
/// Raised by [`FeedSource::start`](crate::sources::FeedSource::start)
/// implementations. The channel converts these into
/// [`FeedError::SourceStart`] before handing them to the subscriber that
/// triggered the episode.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SourceError {
    /// The producer could not be brought up (failed connection, missing
    /// resource, and so on).
    #[error("start failed: {reason}")]
    Start {
        /// The underlying error message.
        reason: String,
    },

    /// `start` was called while the source was already running.
    ///
    /// The channel serializes episode transitions, so a correctly driven
    /// source never observes this; it exists to keep misuse detectable.
    #[error("source is already started")]
    AlreadyStarted,
}

impl SourceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SourceError::Start { .. } => "source_start",
            SourceError::AlreadyStarted => "source_already_started",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SourceError::Start { reason } => format!("start failed: {reason}"),
            SourceError::AlreadyStarted => "already started".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_error_labels_are_stable() {
        let invalid = FeedError::InvalidInterval {
            interval: Duration::ZERO,
        };
        assert_eq!(invalid.as_label(), "invalid_interval");
        assert_eq!(FeedError::Closed.as_label(), "feed_closed");

        let start = FeedError::from(SourceError::Start {
            reason: "boom".into(),
        });
        assert_eq!(start.as_label(), "source_start_failed");
        assert!(start.as_message().contains("boom"));
    }

    #[test]
    fn source_error_converts_into_feed_error() {
        let err: FeedError = SourceError::AlreadyStarted.into();
        match err {
            FeedError::SourceStart { reason } => {
                assert!(reason.contains("already started"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
