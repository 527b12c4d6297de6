//! # Function-backed consumer (`ConsumerFn`)
//!
//! [`ConsumerFn`] wraps a closure `F: Fn(&T)`, turning it into a [`Consume`]
//! implementation. This is the usual way to attach ad-hoc delivery logic in
//! demos and tests without defining a struct.
//!
//! ## Example
//! ```rust
//! use feedmux::{Consume, ConsumerFn, ConsumerRef};
//!
//! let printer: ConsumerRef<u64> = ConsumerFn::arc("printer", |v: &u64| {
//!     println!("got a new {v}");
//! });
//!
//! assert_eq!(printer.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use crate::consumers::Consume;

/// Function-backed consumer implementation.
///
/// The closure runs on the consumer's worker task; keep it short or hand the
/// value off to a channel if heavier processing is needed.
pub struct ConsumerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ConsumerFn<F> {
    /// Creates a new function-backed consumer.
    ///
    /// Prefer [`ConsumerFn::arc`] when you immediately need a [`ConsumerRef`](crate::ConsumerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the consumer and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<T, F> Consume<T> for ConsumerFn<F>
where
    T: Send + Sync + 'static,
    F: Fn(&T) + Send + Sync + 'static,
{
    async fn on_value(&self, value: &T) {
        (self.f)(value);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
