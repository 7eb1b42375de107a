//! In-process sticky signal bus.

use std::{
    collections::HashSet,
    sync::{Mutex, PoisonError},
};

use crate::SignalBus;

/// Named flags that stay raised until a consumer removes them.
#[derive(Debug, Default)]
pub struct StickySignals {
    raised: Mutex<HashSet<String>>,
}

impl StickySignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self, name: &str) {
        let mut raised = self.raised.lock().unwrap_or_else(PoisonError::into_inner);
        if raised.insert(name.to_string()) {
            tracing::debug!(signal = name, "sticky signal raised");
        }
    }

    pub fn is_raised(&self, name: &str) -> bool {
        self.raised
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }
}

impl SignalBus for StickySignals {
    fn remove_sticky(&self, name: &str) -> bool {
        self.raised
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }
}
