//! Shared helpers for the integration suites: a scripted source that emits
//! on demand and records start/stop calls, a recording consumer, and a
//! polling helper for awaiting asynchronous delivery.

// Each suite uses its own subset of these helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use feedmux::{Consume, FeedSink, FeedSource, SourceError};

/// Test double: a source whose emissions are driven by the test body.
pub struct ScriptedSource {
    sink: Mutex<Option<FeedSink<u64>>>,
    starts: AtomicUsize,
    stops: AtomicUsize,
    fail_next_start: AtomicBool,
}

impl ScriptedSource {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self {
            sink: Mutex::new(None),
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
            fail_next_start: AtomicBool::new(false),
        })
    }

    /// Makes the next `start` call fail with a scripted error.
    pub fn fail_next_start(&self) {
        self.fail_next_start.store(true, Ordering::SeqCst);
    }

    /// Pushes a value into the current episode; `false` when not running.
    pub fn emit(&self, value: u64) -> bool {
        self.sink
            .lock()
            .unwrap()
            .as_ref()
            .map(|sink| sink.push(value))
            .unwrap_or(false)
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource<u64> for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start(&self, out: FeedSink<u64>) -> Result<(), SourceError> {
        if self.fail_next_start.swap(false, Ordering::SeqCst) {
            return Err(SourceError::Start {
                reason: "scripted failure".into(),
            });
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.sink.lock().unwrap() = Some(out);
        Ok(())
    }

    async fn stop(&self) {
        if self.sink.lock().unwrap().take().is_some() {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Consumer that records every delivered value.
pub struct Recorder {
    values: Mutex<Vec<u64>>,
}

impl Recorder {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self {
            values: Mutex::new(Vec::new()),
        })
    }

    pub fn values(&self) -> Vec<u64> {
        self.values.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

#[async_trait]
impl Consume<u64> for Recorder {
    async fn on_value(&self, value: &u64) {
        self.values.lock().unwrap().push(*value);
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

/// Polls `cond` until it holds, yielding to the runtime in between.
///
/// Suites run with a paused clock, so the sleeps auto-advance and the wait
/// is effectively instant in real time.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}
