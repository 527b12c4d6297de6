//! # Replay cache for late subscribers.
//!
//! [`ReplayCache`] retains the most recent N values emitted during the
//! current connection episode. When a subscriber joins mid-episode, the
//! channel queues the cache's [`snapshot`](ReplayCache::snapshot) to it ahead
//! of any live value.
//!
//! The buffer's lifetime is scoped to one episode: [`reset`](ReplayCache::reset)
//! is called at the start of every episode, so a resubscribe after teardown
//! never sees stale values from the previous connection.

use std::collections::VecDeque;

/// Bounded buffer of the last N recorded values.
///
/// Capacity 0 disables replay entirely; capacity 1 keeps only the latest
/// value (the two settings observed in practice for shared trade feeds).
#[derive(Debug)]
pub struct ReplayCache<V> {
    buf: VecDeque<V>,
    capacity: usize,
}

impl<V: Clone> ReplayCache<V> {
    /// Creates a cache retaining at most `capacity` values.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a value, evicting the oldest entry beyond capacity.
    ///
    /// With capacity 0 this is a no-op.
    pub fn record(&mut self, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    /// Returns the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<V> {
        self.buf.iter().cloned().collect()
    }

    /// Empties the buffer. Called at the start of each connection episode.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of values currently buffered.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_zero_records_nothing() {
        let mut cache = ReplayCache::new(0);
        cache.record(1);
        cache.record(2);
        assert!(cache.is_empty());
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn capacity_one_keeps_latest() {
        let mut cache = ReplayCache::new(1);
        cache.record(1);
        cache.record(2);
        cache.record(3);
        assert_eq!(cache.snapshot(), vec![3]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_oldest_in_order() {
        let mut cache = ReplayCache::new(3);
        for v in 0..5 {
            cache.record(v);
        }
        assert_eq!(cache.snapshot(), vec![2, 3, 4]);
    }

    #[test]
    fn reset_empties_the_buffer() {
        let mut cache = ReplayCache::new(2);
        cache.record(1);
        cache.reset();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
    }
}
