use std::sync::{Arc, Mutex};

use crate::app::ports::Warner;

/// Forwards warnings to the `tracing` subscriber.
pub struct TracingWarner;

impl Warner for TracingWarner {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Keeps every warning in memory.
///
/// Clones share the same buffer, so a caller can keep one handle while the
/// use case owns another.
#[derive(Clone, Default)]
pub struct CollectingWarner {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingWarner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Warner for CollectingWarner {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
