//! # Simple stdout consumer for debugging and demos.
//!
//! [`LogSink`] prints every delivered value in a human-readable format.
//!
//! ## Output format
//! ```text
//! [feed] got 0
//! [feed] got 1
//! ```

use std::fmt::Display;

use async_trait::async_trait;

use crate::consumers::Consume;

/// Stdout logging consumer.
///
/// Enabled via the `logging` feature. Prints each value to stdout for
/// debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Consume`] for
/// structured logging or metrics collection.
pub struct LogSink;

#[async_trait]
impl<T> Consume<T> for LogSink
where
    T: Display + Send + Sync + 'static,
{
    async fn on_value(&self, value: &T) {
        println!("[feed] got {value}");
    }

    fn name(&self) -> &str {
        "log-sink"
    }
}
