//! Scoped "close on outside click" subscriptions
//!
//! A popup holds a [`ClickAwaySubscription`] for as long as it is open and
//! must present it to ask whether a press landed outside. The subscription
//! is released when dropped, so every way of closing a popup detaches it
//! and the shared count shows how many popups are still listening.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Shared registry of open popups listening for outside clicks
#[derive(Debug, Clone, Default)]
pub struct ClickAwayListeners {
    active: Arc<AtomicUsize>,
}

impl ClickAwayListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, owner: &'static str) -> ClickAwaySubscription {
        let count = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(owner, active = count, "Outside click listener attached");
        ClickAwaySubscription {
            active: self.active.clone(),
            owner,
        }
    }

    /// Number of subscriptions currently held
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct ClickAwaySubscription {
    active: Arc<AtomicUsize>,
    owner: &'static str,
}

impl Drop for ClickAwaySubscription {
    fn drop(&mut self) {
        let count = self.active.fetch_sub(1, Ordering::SeqCst) - 1;
        trace!(owner = self.owner, active = count, "Outside click listener released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_releases_subscription() {
        let listeners = ClickAwayListeners::new();
        let a = listeners.subscribe("a");
        let b = listeners.clone().subscribe("b");
        assert_eq!(listeners.active(), 2);
        drop(a);
        assert_eq!(listeners.active(), 1);
        drop(b);
        assert_eq!(listeners.active(), 0);
    }
}
