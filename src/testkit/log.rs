//! Shared call log recorded by every fake collaborator.

use std::sync::{Arc, Mutex};

/// Ordered record of port calls, e.g. `"repos.clone https://… /opt/x"`.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    /// Snapshot of all recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls starting with `prefix`.
    #[must_use]
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    /// Whether any call starts with `prefix`.
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.count_prefix(prefix) > 0
    }
}
