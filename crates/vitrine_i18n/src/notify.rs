//! Locale change notification.
//!
//! Observers are called synchronously, in subscription order, with the new
//! locale identifier. Each dispatch works on a snapshot of the observer
//! list taken before the first call, so an observer may subscribe or
//! unsubscribe (itself included) while being notified. Changes made during
//! a dispatch take effect from the next one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked with the newly active locale.
pub type LocaleObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// Token returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct LocaleNotifier {
    next_id: AtomicU64,
    observers: Mutex<Vec<(SubscriptionId, LocaleObserver)>>,
}

impl LocaleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, LocaleObserver)>> {
        // The lock is never held across observer calls.
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self, observer: LocaleObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers().push((id, observer));
        id
    }

    /// Returns `false` if `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    pub fn dispatch(&self, locale: &str) {
        let snapshot: Vec<LocaleObserver> = self
            .observers()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in snapshot {
            observer(locale);
        }
    }

    pub fn len(&self) -> usize {
        self.observers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
